//! `Astgen.toml` handling and the merge of flags, file and defaults.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use astgen::{EmissionStyle, Emitter, SyntaxKind};
use astgen_grammar::{Grammar, lox};
use serde::Deserialize;
use tracing::debug;

use crate::args::GrammarArgs;

/// The standard configuration filename.
pub const CONFIG_FILENAME: &str = "Astgen.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AstgenConfig {
    /// Grammar description file. Relative paths are resolved against the
    /// directory holding the configuration file.
    pub grammar: Option<PathBuf>,
    pub style: Option<EmissionStyle>,
    pub syntax: Option<SyntaxKind>,
    pub namespace: Option<String>,
    #[serde(default)]
    pub rust: RustConfig,
}

/// Settings only the Rust syntax reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RustConfig {
    pub derives: Option<Vec<String>>,
}

impl AstgenConfig {
    /// Find the configuration file by searching upward from `start_dir`.
    pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILENAME);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let (Some(grammar), Some(dir)) = (&config.grammar, path.parent()) {
            config.grammar = Some(dir.join(grammar));
        }
        Ok(config)
    }

    /// Load configuration by searching upward from the given directory.
    pub fn load_from_dir(start_dir: &Path) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        if let Some(config_path) = Self::find_config_file(start_dir) {
            let config = Self::load(&config_path)?;
            Ok(Some((config_path, config)))
        } else {
            Ok(None)
        }
    }
}

/// What a command runs with: the grammar and a configured emitter.
#[derive(Debug)]
pub struct Settings {
    pub grammar: Grammar,
    pub emitter: Emitter,
}

impl Settings {
    pub fn resolve(args: &GrammarArgs) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => AstgenConfig::load(path)?,
            None => {
                let current_dir =
                    std::env::current_dir().context("failed to get current directory")?;
                match AstgenConfig::load_from_dir(&current_dir)? {
                    Some((path, config)) => {
                        debug!(path = %path.display(), "using configuration file");
                        config
                    }
                    None => AstgenConfig::default(),
                }
            }
        };
        Self::merge(args, config)
    }

    /// Flags win over the file, the file wins over defaults.
    fn merge(args: &GrammarArgs, config: AstgenConfig) -> anyhow::Result<Self> {
        let grammar = match args.grammar.as_ref().or(config.grammar.as_ref()) {
            Some(path) => Grammar::load(path)
                .with_context(|| format!("failed to load grammar {}", path.display()))?,
            None => lox::grammar(),
        };
        let emitter = Emitter::builder()
            .maybe_syntax(args.syntax.map(Into::into).or(config.syntax))
            .maybe_style(args.style.map(Into::into).or(config.style))
            .maybe_namespace(args.namespace.clone().or(config.namespace))
            .maybe_derives(config.rust.derives)
            .build();
        anyhow::ensure!(
            emitter.has_valid_namespace(),
            "namespace `{}` is not a valid {} namespace",
            emitter.namespace(),
            emitter.syntax()
        );
        debug!(
            syntax = %emitter.syntax(),
            style = %emitter.style(),
            bases = grammar.iter().len(),
            "resolved settings"
        );
        Ok(Self { grammar, emitter })
    }
}
