use std::path::PathBuf;

/// Error type for grammar loading.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("failed to read grammar file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid grammar description: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("field `{text}` must be written as `<type> <name>`")]
    MalformedField { text: String },
    #[error("field type must not be empty")]
    EmptyType,
}
