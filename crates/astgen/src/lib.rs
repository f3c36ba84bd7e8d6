//! AST node and visitor generator.
//!
//! Given a [`Grammar`](astgen_grammar::Grammar), emits one source file per
//! base type: the base type, one node type per variant and the visitor
//! contracts that dispatch over them.
//!
//! ```ignore
//! let emitter = Emitter::builder().style(EmissionStyle::Both).build();
//! for outcome in emitter.emit_grammar(&astgen_grammar::lox::grammar(), out_dir) {
//!     outcome.result?;
//! }
//! ```
//!
//! # Styles
//!
//! - [`EmissionStyle::Untyped`] - visitors whose methods return nothing
//! - [`EmissionStyle::Typed`] - visitors generic over a result type
//! - [`EmissionStyle::Both`] - both contracts side by side
//! - [`EmissionStyle::Plain`] - data types only, no visitors

mod emitter;
mod error;
mod style;
pub mod syntax;
mod validate;
mod writer;

pub use emitter::{
    DEFAULT_NAMESPACE, EmitOutcome, Emitter, RenderContext, RenderOutcome, default_derives,
};
pub use error::{EmitError, SchemaError};
pub use style::{EmissionStyle, SyntaxKind, UnknownOption};
pub use validate::is_identifier;
