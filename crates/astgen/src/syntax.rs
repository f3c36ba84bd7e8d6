//! Target syntaxes.
//!
//! A [`Syntax`] renders each piece of an artifact; the emitter decides which
//! pieces appear and in what order. Adding a target means implementing this
//! trait, nothing else.

use astgen_grammar::{BaseTypeSpec, VariantSpec};

use crate::{EmissionStyle, RenderContext, SchemaError};

mod csharp;
mod rust;

pub use csharp::CSharp;
pub use rust::RustSyntax;

pub trait Syntax {
    /// A rendered piece of an artifact.
    type Fragment;

    /// File name of the artifact generated for `base`.
    fn file_name(&self, base: &str) -> String;

    /// Whether `ident` is a keyword of the target language.
    fn is_reserved(&self, ident: &str) -> bool;

    /// Identifier a field is declared under.
    fn member_name(&self, field: &str) -> String;

    /// The reserved identifier `field` collides with when declared in
    /// `type_name`, if any.
    fn reserved_member(&self, type_name: &str, field: &str) -> Option<String>;

    /// Name of the visitor method `variant` dispatches to.
    fn visit_name(&self, base: &str, variant: &VariantSpec) -> String {
        format!("Visit{}", variant.type_name(base))
    }

    /// Whether `namespace` can enclose the artifact. Syntaxes that emit no
    /// namespace accept anything.
    fn is_valid_namespace(&self, _namespace: &str) -> bool {
        true
    }

    /// Checks only this syntax needs, run after the common validation.
    fn check(&self, _spec: &BaseTypeSpec, _ctx: &RenderContext) -> Result<(), SchemaError> {
        Ok(())
    }

    fn imports(&self, spec: &BaseTypeSpec) -> Result<Self::Fragment, SchemaError>;

    fn open_scope(&self, namespace: &str) -> Self::Fragment;

    fn untyped_visitor(&self, spec: &BaseTypeSpec) -> Self::Fragment;

    fn typed_visitor(&self, spec: &BaseTypeSpec) -> Self::Fragment;

    fn base(&self, spec: &BaseTypeSpec, style: EmissionStyle) -> Self::Fragment;

    fn variant(
        &self,
        spec: &BaseTypeSpec,
        variant: &VariantSpec,
        style: EmissionStyle,
        ctx: &RenderContext,
    ) -> Result<Self::Fragment, SchemaError>;

    fn close_scope(&self, namespace: &str) -> Self::Fragment;

    /// Join the fragments, in order, into the artifact body.
    fn finish(
        &self,
        spec: &BaseTypeSpec,
        fragments: Vec<Self::Fragment>,
    ) -> Result<String, SchemaError>;
}

/// First line of every artifact.
pub fn header_comment(base: &str) -> String {
    format!("// @generated by astgen from {base}. Do not edit by hand.")
}
