//! Loading grammars from TOML description files.
//!
//! ```toml
//! [[base]]
//! name = "Expr"
//! imports = ["System.Collections.Generic"]
//!
//! [[base.variant]]
//! name = "Binary"
//! fields = ["Expr Left", "Token Operator", "Expr Right"]
//! ```

use std::path::Path;

use crate::{Grammar, GrammarError};

impl Grammar {
    /// Load a grammar description from a file.
    pub fn load(path: &Path) -> Result<Self, GrammarError> {
        let content = std::fs::read_to_string(path).map_err(|source| GrammarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    /// Parse a grammar description from a string.
    pub fn parse_str(content: &str) -> Result<Self, GrammarError> {
        Ok(toml::from_str(content)?)
    }
}
