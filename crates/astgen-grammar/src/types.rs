use std::collections::BTreeSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Deserialize;

use crate::GrammarError;

/// The type of a field, in the notation used by grammar descriptions.
///
/// `List<T>` and a trailing `?` are understood structurally; everything else
/// is kept verbatim as a [`TypeRef::Named`] type, which lets a grammar mention
/// placeholder types (`Token`, `object`) or other base types (`Expr`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    Optional(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    /// Parse the notation without rejecting empty text.
    ///
    /// Used for hand-authored grammars; an empty name survives as
    /// `Named("")` so that the emitter can report where it came from.
    pub fn from_notation(text: &str) -> Self {
        let text = text.trim();
        if let Some(inner) = text.strip_suffix('?') {
            return TypeRef::optional(TypeRef::from_notation(inner));
        }
        if let Some(inner) = text
            .strip_prefix("List<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return TypeRef::list(TypeRef::from_notation(inner));
        }
        TypeRef::Named(text.to_string())
    }

    /// Whether an optional wrapper appears anywhere in the type.
    pub fn has_optional(&self) -> bool {
        match self {
            TypeRef::Named(_) => false,
            TypeRef::List(inner) => inner.has_optional(),
            TypeRef::Optional(_) => true,
        }
    }

    /// The named type at the bottom of any list/optional wrappers.
    pub fn element_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::Optional(inner) => inner.element_name(),
        }
    }
}

impl FromStr for TypeRef {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(GrammarError::EmptyType);
        }
        Ok(TypeRef::from_notation(s))
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::List(inner) => write!(f, "List<{inner}>"),
            TypeRef::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

/// One stored field of a variant, written `<type> <name>` in descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldSpec {
    pub ty: TypeRef,
    pub name: String,
}

impl FieldSpec {
    pub fn new(ty: TypeRef, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

impl FromStr for FieldSpec {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split at the last whitespace so that `Dictionary<string, Expr> Map` works.
        let text = s.trim();
        let Some((ty, name)) = text.rsplit_once(char::is_whitespace) else {
            return Err(GrammarError::MalformedField {
                text: text.to_string(),
            });
        };
        Ok(FieldSpec::new(ty.parse()?, name))
    }
}

impl TryFrom<String> for FieldSpec {
    type Error = GrammarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

/// One production of a base type, e.g. `Binary` under `Expr`.
///
/// Field order is significant: it is the constructor parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, ty: &str, name: &str) -> Self {
        self.fields
            .push(FieldSpec::new(TypeRef::from_notation(ty), name));
        self
    }

    /// Name of the concrete type generated for this variant (`BinaryExpr`).
    pub fn type_name(&self, base: &str) -> String {
        format!("{}{}", self.name, base)
    }
}

/// One grammar nonterminal: a base type, its variants and the imports its
/// generated artifact needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaseTypeSpec {
    pub name: String,
    #[serde(default, rename = "variant")]
    pub variants: Vec<VariantSpec>,
    #[serde(default)]
    pub imports: Vec<String>,
}

impl BaseTypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn import(mut self, module: impl Into<String>) -> Self {
        self.imports.push(module.into());
        self
    }

    /// Append a variant given as `(type, name)` pairs.
    pub fn variant<'a>(
        self,
        name: &str,
        fields: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let variant = fields
            .into_iter()
            .fold(VariantSpec::new(name), |variant, (ty, field)| {
                variant.field(ty, field)
            });
        self.with_variant(variant)
    }

    pub fn with_variant(mut self, variant: VariantSpec) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn get_variant(&self, name: &str) -> Option<&VariantSpec> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// The complete schema: base types in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Grammar {
    #[serde(default, rename = "base")]
    pub bases: Vec<BaseTypeSpec>,
}

impl Grammar {
    pub fn new(bases: Vec<BaseTypeSpec>) -> Self {
        Self { bases }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BaseTypeSpec> {
        self.bases.iter()
    }

    pub fn get(&self, name: &str) -> Option<&BaseTypeSpec> {
        self.bases.iter().find(|b| b.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Every type the generated code defines: base names and variant type names.
    pub fn node_type_names(&self) -> BTreeSet<String> {
        self.bases
            .iter()
            .flat_map(|base| {
                std::iter::once(base.name.clone())
                    .chain(base.variants.iter().map(|v| v.type_name(&base.name)))
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Grammar {
    type Item = &'a BaseTypeSpec;
    type IntoIter = std::slice::Iter<'a, BaseTypeSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.bases.iter()
    }
}

impl FromIterator<BaseTypeSpec> for Grammar {
    fn from_iter<I: IntoIterator<Item = BaseTypeSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
