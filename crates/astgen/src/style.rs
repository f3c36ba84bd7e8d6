//! Emission styles and target syntaxes.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Deserialize;

/// Which visitor contracts and dispatch entry points an artifact carries.
///
/// A run produces exactly one style per base type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionStyle {
    /// Visitor returning nothing, with a non-generic `accept`.
    Untyped,
    /// Visitor generic over its result type, with a generic `accept`.
    Typed,
    /// Both visitor contracts and both `accept` entry points.
    #[default]
    Both,
    /// No visitors and no dispatch: base and variants as plain data carriers.
    Plain,
}

impl EmissionStyle {
    pub const ALL: [EmissionStyle; 4] = [
        EmissionStyle::Untyped,
        EmissionStyle::Typed,
        EmissionStyle::Both,
        EmissionStyle::Plain,
    ];

    pub fn emits_untyped(self) -> bool {
        matches!(self, EmissionStyle::Untyped | EmissionStyle::Both)
    }

    pub fn emits_typed(self) -> bool {
        matches!(self, EmissionStyle::Typed | EmissionStyle::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmissionStyle::Untyped => "untyped",
            EmissionStyle::Typed => "typed",
            EmissionStyle::Both => "both",
            EmissionStyle::Plain => "plain",
        }
    }
}

impl Display for EmissionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmissionStyle {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| UnknownOption {
                kind: "emission style",
                value: s.to_string(),
                expected: "untyped, typed, both, plain",
            })
    }
}

/// The target syntax generated code is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxKind {
    /// Class hierarchy with interfaces, written to `<Base>.cs`.
    #[default]
    CSharp,
    /// Enum plus variant structs and visitor traits, written to `<base>.rs`.
    Rust,
}

impl SyntaxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::CSharp => "csharp",
            SyntaxKind::Rust => "rust",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            SyntaxKind::CSharp => "cs",
            SyntaxKind::Rust => "rs",
        }
    }
}

impl Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyntaxKind {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csharp" => Ok(SyntaxKind::CSharp),
            "rust" => Ok(SyntaxKind::Rust),
            _ => Err(UnknownOption {
                kind: "syntax",
                value: s.to_string(),
                expected: "csharp, rust",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}
