//! Shared argument definitions.

use std::path::PathBuf;

use astgen::{EmissionStyle, SyntaxKind};
use clap::ValueEnum;

/// Arguments selecting the grammar and how it is rendered.
///
/// Embedded in command Args using `#[command(flatten)]`. Every flag left
/// unset falls back to `Astgen.toml`, then to the built-in default.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct GrammarArgs {
    /// Grammar description file (TOML). Defaults to the built-in Lox grammar
    #[arg(short, long)]
    pub grammar: Option<PathBuf>,

    /// Which visitor contracts to generate
    #[arg(short, long, value_enum)]
    pub style: Option<StyleArg>,

    /// Target language
    #[arg(long, value_enum)]
    pub syntax: Option<SyntaxArg>,

    /// Namespace enclosing the generated C# types
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Configuration file. Searched upward from the current directory if omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleArg {
    /// Visitor returning nothing
    Untyped,
    /// Visitor generic over its result
    Typed,
    /// Both visitors
    Both,
    /// No visitors, data types only
    Plain,
}

impl From<StyleArg> for EmissionStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Untyped => EmissionStyle::Untyped,
            StyleArg::Typed => EmissionStyle::Typed,
            StyleArg::Both => EmissionStyle::Both,
            StyleArg::Plain => EmissionStyle::Plain,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntaxArg {
    /// C# classes and interfaces
    Csharp,
    /// Rust enums, structs and traits
    Rust,
}

impl From<SyntaxArg> for SyntaxKind {
    fn from(syntax: SyntaxArg) -> Self {
        match syntax {
            SyntaxArg::Csharp => SyntaxKind::CSharp,
            SyntaxArg::Rust => SyntaxKind::Rust,
        }
    }
}
