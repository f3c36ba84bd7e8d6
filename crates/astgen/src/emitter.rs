use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use astgen_grammar::{BaseTypeSpec, Grammar};
use tracing::{debug, info, warn};

use crate::syntax::{CSharp, RustSyntax, Syntax, header_comment};
use crate::validate::validate;
use crate::{EmissionStyle, EmitError, SchemaError, SyntaxKind};

/// Namespace generated artifacts share unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "LoxInterpreter";

pub fn default_derives() -> Vec<String> {
    ["Debug", "Clone", "PartialEq"].map(String::from).to_vec()
}

/// Grammar-wide facts a single artifact needs: which type names are tree
/// nodes defined by some artifact of the same run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    node_types: BTreeSet<String>,
}

impl RenderContext {
    pub fn from_grammar(grammar: &Grammar) -> Self {
        Self {
            node_types: grammar.node_type_names(),
        }
    }

    /// Context for a base type rendered on its own.
    pub fn for_base(spec: &BaseTypeSpec) -> Self {
        Self {
            node_types: std::iter::once(spec.name.clone())
                .chain(spec.variants.iter().map(|v| v.type_name(&spec.name)))
                .collect(),
        }
    }

    pub fn is_node(&self, type_name: &str) -> bool {
        self.node_types.contains(type_name)
    }
}

/// Result of rendering one base type in memory.
#[derive(Debug)]
pub struct RenderOutcome {
    pub base: String,
    /// File the artifact would be written to.
    pub file: String,
    pub result: Result<String, SchemaError>,
}

/// Result of emitting one base type.
#[derive(Debug)]
pub struct EmitOutcome {
    pub base: String,
    pub result: Result<PathBuf, EmitError>,
}

/// Maps base type definitions to generated source files.
///
/// Use the builder pattern to construct:
/// ```ignore
/// let emitter = Emitter::builder()
///     .syntax(SyntaxKind::Rust)
///     .style(EmissionStyle::Typed)
///     .build();
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct Emitter {
    #[builder(default)]
    syntax: SyntaxKind,

    #[builder(default)]
    style: EmissionStyle,

    /// Enclosing namespace, for syntaxes that declare one.
    #[builder(into, default = DEFAULT_NAMESPACE.to_string())]
    namespace: String,

    /// Derives on generated Rust types.
    #[builder(default = default_derives())]
    derives: Vec<String>,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Emitter {
    pub fn syntax(&self) -> SyntaxKind {
        self.syntax
    }

    pub fn style(&self) -> EmissionStyle {
        self.style
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether the configured namespace can be emitted by the configured
    /// syntax. Rendering fails for every base type otherwise.
    pub fn has_valid_namespace(&self) -> bool {
        match self.syntax {
            SyntaxKind::CSharp => CSharp.is_valid_namespace(&self.namespace),
            SyntaxKind::Rust => true,
        }
    }

    /// File name the artifact for `spec` is written to.
    pub fn file_name(&self, spec: &BaseTypeSpec) -> String {
        match self.syntax {
            SyntaxKind::CSharp => CSharp.file_name(&spec.name),
            SyntaxKind::Rust => RustSyntax::module_file_name(&spec.name),
        }
    }

    /// Render the artifact for `spec` without touching the filesystem.
    ///
    /// The output depends only on the arguments and the emitter settings.
    pub fn render(&self, spec: &BaseTypeSpec, ctx: &RenderContext) -> Result<String, SchemaError> {
        match self.syntax {
            SyntaxKind::CSharp => self.render_in(&CSharp, spec, ctx),
            SyntaxKind::Rust => {
                let syntax =
                    RustSyntax::new(&self.derives).map_err(|error| SchemaError::Render {
                        base: spec.name.clone(),
                        message: format!("invalid derive: {error}"),
                    })?;
                self.render_in(&syntax, spec, ctx)
            }
        }
    }

    /// Render with an arbitrary syntax.
    pub fn render_in<S: Syntax>(
        &self,
        syntax: &S,
        spec: &BaseTypeSpec,
        ctx: &RenderContext,
    ) -> Result<String, SchemaError> {
        if !syntax.is_valid_namespace(&self.namespace) {
            return Err(SchemaError::InvalidNamespace {
                base: spec.name.clone(),
                namespace: self.namespace.clone(),
            });
        }
        validate(syntax, spec)?;
        syntax.check(spec, ctx)?;

        let style = self.style;
        let mut fragments = vec![syntax.imports(spec)?, syntax.open_scope(&self.namespace)];
        if style.emits_untyped() {
            fragments.push(syntax.untyped_visitor(spec));
        }
        if style.emits_typed() {
            fragments.push(syntax.typed_visitor(spec));
        }
        fragments.push(syntax.base(spec, style));
        for variant in &spec.variants {
            fragments.push(syntax.variant(spec, variant, style, ctx)?);
        }
        fragments.push(syntax.close_scope(&self.namespace));

        let body = syntax.finish(spec, fragments)?;
        debug!(
            base = %spec.name,
            variants = spec.variants.len(),
            style = %style,
            "rendered artifact"
        );
        Ok(format!("{}\n\n{body}", header_comment(&spec.name)))
    }

    /// Render `spec` and write it into `target_dir`, replacing any existing
    /// file. The directory must already exist.
    pub fn emit(
        &self,
        spec: &BaseTypeSpec,
        ctx: &RenderContext,
        target_dir: &Path,
    ) -> Result<PathBuf, EmitError> {
        let source = self.render(spec, ctx)?;
        self.write(&spec.name, &self.file_name(spec), source, target_dir)
    }

    /// Render every base type of `grammar` in order without writing anything.
    ///
    /// Two base types mapping to the same file is a schema error for the
    /// second one.
    pub fn render_grammar(&self, grammar: &Grammar) -> Vec<RenderOutcome> {
        let ctx = RenderContext::from_grammar(grammar);
        let mut claimed: HashMap<String, &str> = HashMap::new();
        grammar
            .iter()
            .map(|spec| {
                let file = self.file_name(spec);
                let result = match claimed.get(&file) {
                    Some(other) => Err(SchemaError::FileCollision {
                        base: spec.name.clone(),
                        other: other.to_string(),
                        file: file.clone(),
                    }),
                    None => {
                        claimed.insert(file.clone(), &spec.name);
                        self.render(spec, &ctx)
                    }
                };
                RenderOutcome {
                    base: spec.name.clone(),
                    file,
                    result,
                }
            })
            .collect()
    }

    /// Emit every base type of `grammar` in order.
    ///
    /// Each base type succeeds or fails on its own; a failure never stops
    /// the remaining ones.
    pub fn emit_grammar(&self, grammar: &Grammar, target_dir: &Path) -> Vec<EmitOutcome> {
        self.render_grammar(grammar)
            .into_iter()
            .map(|RenderOutcome { base, file, result }| {
                let result = result
                    .map_err(EmitError::from)
                    .and_then(|source| self.write(&base, &file, source, target_dir));
                if let Err(error) = &result {
                    warn!(base = %base, %error, "skipped artifact");
                }
                EmitOutcome { base, result }
            })
            .collect()
    }

    fn write(
        &self,
        base: &str,
        file: &str,
        source: String,
        target_dir: &Path,
    ) -> Result<PathBuf, EmitError> {
        let path = target_dir.join(file);
        std::fs::write(&path, source).map_err(|source| EmitError::Io {
            path: path.clone(),
            source,
        })?;
        info!(base, path = %path.display(), "wrote artifact");
        Ok(path)
    }
}
