//! Grammar schema for astgen.
//!
//! A grammar is a list of base types (nonterminals such as `Expr` or `Stmt`),
//! each with an ordered list of variants (productions such as `Binary`), each
//! with an ordered list of typed fields. The schema is pure data: it is built
//! once, either by hand or from a TOML description file, and read by the
//! emitter. No semantic validation happens here.
//!
//! # Types
//!
//! - [`Grammar`] - The whole schema, in declaration order
//! - [`BaseTypeSpec`] - One base type and its variants
//! - [`VariantSpec`] - One production of a base type
//! - [`FieldSpec`] - One typed field of a variant
//! - [`TypeRef`] - A field type (`Name`, `List<T>` or `T?`)

mod error;
mod load;
pub mod lox;
mod types;

pub use error::GrammarError;
pub use types::*;
