//! C# backend: an interface per visitor contract, an abstract base class and
//! one subclass per variant.

use astgen_grammar::{BaseTypeSpec, VariantSpec};

use super::Syntax;
use crate::validate::is_identifier;
use crate::writer::CodeWriter;
use crate::{EmissionStyle, RenderContext, SchemaError, SyntaxKind};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Name of the dispatch method every variant overrides.
const ACCEPT: &str = "Accept";

#[derive(Debug, Clone, Copy, Default)]
pub struct CSharp;

impl CSharp {
    fn visitor_param(&self, base: &str) -> String {
        let name = base.to_lowercase();
        if self.is_reserved(&name) {
            format!("@{name}")
        } else {
            name
        }
    }
}

impl Syntax for CSharp {
    type Fragment = String;

    fn file_name(&self, base: &str) -> String {
        format!("{base}.{}", SyntaxKind::CSharp.extension())
    }

    fn is_reserved(&self, ident: &str) -> bool {
        KEYWORDS.contains(&ident)
    }

    fn member_name(&self, field: &str) -> String {
        field.to_string()
    }

    fn reserved_member(&self, type_name: &str, field: &str) -> Option<String> {
        // A member may not share its enclosing type's name.
        if self.is_reserved(field) || field == ACCEPT || field == type_name {
            Some(field.to_string())
        } else {
            None
        }
    }

    fn is_valid_namespace(&self, namespace: &str) -> bool {
        namespace
            .split('.')
            .all(|segment| is_identifier(segment) && !self.is_reserved(segment))
    }

    fn imports(&self, spec: &BaseTypeSpec) -> Result<String, SchemaError> {
        let mut out: String = spec
            .imports
            .iter()
            .map(|import| format!("using {import};\n"))
            .collect();
        // `T?` on reference types needs the nullable context.
        let nullable = spec
            .variants
            .iter()
            .flat_map(|variant| &variant.fields)
            .any(|field| field.ty.has_optional());
        if nullable {
            out.push_str("#nullable enable\n");
        }
        Ok(out)
    }

    fn open_scope(&self, namespace: &str) -> String {
        format!("namespace {namespace}\n{{\n")
    }

    fn untyped_visitor(&self, spec: &BaseTypeSpec) -> String {
        let base = &spec.name;
        let param = self.visitor_param(base);
        let mut w = CodeWriter::new(1);
        w.open(format!("interface I{base}Visitor"));
        for variant in &spec.variants {
            let ty = variant.type_name(base);
            w.line(format!("void Visit{ty}({ty} {param});"));
        }
        w.close();
        w.finish()
    }

    fn typed_visitor(&self, spec: &BaseTypeSpec) -> String {
        let base = &spec.name;
        let param = self.visitor_param(base);
        let mut w = CodeWriter::new(1);
        w.open(format!("interface I{base}Visitor<T>"));
        for variant in &spec.variants {
            let ty = variant.type_name(base);
            w.line(format!("T Visit{ty}({ty} {param});"));
        }
        w.close();
        w.finish()
    }

    fn base(&self, spec: &BaseTypeSpec, style: EmissionStyle) -> String {
        let base = &spec.name;
        let mut w = CodeWriter::new(1);
        w.open(format!("abstract class {base}"));
        if style.emits_untyped() {
            w.line(format!("public abstract void {ACCEPT}(I{base}Visitor visitor);"));
        }
        if style.emits_typed() {
            w.line(format!(
                "public abstract T {ACCEPT}<T>(I{base}Visitor<T> visitor);"
            ));
        }
        w.close();
        w.finish()
    }

    fn variant(
        &self,
        spec: &BaseTypeSpec,
        variant: &VariantSpec,
        style: EmissionStyle,
        _ctx: &RenderContext,
    ) -> Result<String, SchemaError> {
        let base = &spec.name;
        let ty = variant.type_name(base);
        let mut w = CodeWriter::new(1);
        w.open(format!("class {ty} : {base}"));

        for field in &variant.fields {
            w.line(format!("public {} {} {{ get; }}", field.ty, field.name));
        }

        let params = variant
            .fields
            .iter()
            .map(|field| format!("{} {}", field.ty, field.name))
            .collect::<Vec<_>>()
            .join(", ");
        w.open(format!("public {ty}({params})"));
        for field in &variant.fields {
            w.line(format!("this.{0} = {0};", field.name));
        }
        w.close();

        if style.emits_untyped() {
            w.open(format!("public override void {ACCEPT}(I{base}Visitor visitor)"));
            w.line(format!("visitor.Visit{ty}(this);"));
            w.close();
        }
        if style.emits_typed() {
            w.open(format!(
                "public override T {ACCEPT}<T>(I{base}Visitor<T> visitor)"
            ));
            w.line(format!("return visitor.Visit{ty}(this);"));
            w.close();
        }

        w.close();
        Ok(w.finish())
    }

    fn close_scope(&self, _namespace: &str) -> String {
        "}\n".to_string()
    }

    fn finish(&self, _spec: &BaseTypeSpec, fragments: Vec<String>) -> Result<String, SchemaError> {
        Ok(fragments.concat())
    }
}
