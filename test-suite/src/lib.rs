//! Golden cases for astgen.
//!
//! Each directory under `cases/` holds a `case.toml` describing one run of
//! the emitter, the grammar it runs on, and an `expected/` directory with the
//! artifacts that run must produce byte for byte. Base types that must fail
//! are listed under `[errors]` with a fragment of the expected message.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use astgen::{EmissionStyle, SyntaxKind};
use serde::Deserialize;

mod case;
mod runner;

pub use case::{CaseResult, CheckResult, ScenarioResult};

pub const CASE_FILENAME: &str = "case.toml";

pub fn cases_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("cases")
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CaseData {
    #[serde(default)]
    pub description: String,
    /// Grammar file relative to the case directory. The built-in Lox grammar
    /// is used when absent.
    pub grammar: Option<PathBuf>,
    #[serde(default)]
    pub style: EmissionStyle,
    #[serde(default)]
    pub syntax: SyntaxKind,
    pub namespace: Option<String>,
    /// Base type name to a fragment of the error it must fail with.
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub dir: PathBuf,
    pub data: CaseData,
}

impl Case {
    pub fn expected_dir(&self) -> PathBuf {
        self.dir.join("expected")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CollectCasesError {
    #[error("failed to read {}: {error}", .path.display())]
    IoError {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("invalid {}: {error}", .path.display())]
    ParseError {
        path: PathBuf,
        error: toml::de::Error,
    },
}

impl CollectCasesError {
    pub fn path(&self) -> &Path {
        match self {
            CollectCasesError::IoError { path, .. }
            | CollectCasesError::ParseError { path, .. } => path,
        }
    }
}

/// Every case under [`cases_dir`], sorted by name.
pub fn collect_cases() -> Result<Vec<Result<Case, CollectCasesError>>, CollectCasesError> {
    collect_cases_in(&cases_dir())
}

pub fn collect_cases_in(
    dir: &Path,
) -> Result<Vec<Result<Case, CollectCasesError>>, CollectCasesError> {
    let entries = std::fs::read_dir(dir).map_err(|error| CollectCasesError::IoError {
        path: dir.to_path_buf(),
        error,
    })?;
    let mut dirs = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.join(CASE_FILENAME).is_file())
        .collect::<Vec<_>>();
    dirs.sort();
    Ok(dirs.into_iter().map(load_case).collect())
}

fn load_case(dir: PathBuf) -> Result<Case, CollectCasesError> {
    let path = dir.join(CASE_FILENAME);
    let content = std::fs::read_to_string(&path)
        .map_err(|error| CollectCasesError::IoError { path: path.clone(), error })?;
    let data = toml::from_str(&content)
        .map_err(|error| CollectCasesError::ParseError { path, error })?;
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Case { name, dir, data })
}
