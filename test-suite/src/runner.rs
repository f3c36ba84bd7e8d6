use std::collections::BTreeSet;
use std::fs;

use anyhow::{Context, Result};
use astgen::Emitter;
use astgen_grammar::{Grammar, lox};

use crate::{Case, CaseResult, CheckResult, ScenarioResult};

impl Case {
    pub fn grammar(&self) -> Result<Grammar> {
        match &self.data.grammar {
            Some(path) => {
                let path = self.dir.join(path);
                Grammar::load(&path).with_context(|| format!("loading {}", path.display()))
            }
            None => Ok(lox::grammar()),
        }
    }

    pub fn emitter(&self) -> Emitter {
        Emitter::builder()
            .syntax(self.data.syntax)
            .style(self.data.style)
            .maybe_namespace(self.data.namespace.clone())
            .build()
    }

    /// Emit the case's grammar into a scratch directory and compare every
    /// artifact and error against the expectations.
    pub fn run(&self) -> CaseResult {
        match self.run_checks() {
            Ok(checks) => CaseResult { checks },
            Err(e) => CaseResult {
                checks: vec![CheckResult {
                    name: "setup".to_string(),
                    result: ScenarioResult::failed(format!("{e:#}")),
                }],
            },
        }
    }

    fn run_checks(&self) -> Result<Vec<CheckResult>> {
        let grammar = self.grammar()?;
        let out_dir = tempfile::tempdir().context("creating output directory")?;
        let outcomes = self.emitter().emit_grammar(&grammar, out_dir.path());

        let mut checks = Vec::new();
        let mut produced = BTreeSet::new();
        for outcome in outcomes {
            let expected_error = self.data.errors.get(&outcome.base);
            let result = match (outcome.result, expected_error) {
                (Ok(path), None) => {
                    let file = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let result = self.compare(&file, &fs::read_to_string(&path)?)?;
                    produced.insert(file);
                    result
                }
                (Ok(path), Some(expected)) => ScenarioResult::failed(format!(
                    "expected an error containing `{expected}`, but {} was generated",
                    path.display()
                )),
                (Err(error), Some(expected)) if error.to_string().contains(expected.as_str()) => {
                    ScenarioResult::Passed
                }
                (Err(error), Some(expected)) => ScenarioResult::failed(format!(
                    "expected an error containing `{expected}`, got: {error}"
                )),
                (Err(error), None) => ScenarioResult::failed(format!("unexpected error: {error}")),
            };
            checks.push(CheckResult {
                name: outcome.base,
                result,
            });
        }

        for base in self.data.errors.keys() {
            if grammar.get(base).is_none() {
                checks.push(CheckResult {
                    name: base.clone(),
                    result: ScenarioResult::failed(
                        "error expected for a base type the grammar does not declare",
                    ),
                });
            }
        }

        for file in self.expected_files()? {
            if !produced.contains(&file) {
                checks.push(CheckResult {
                    name: file,
                    result: ScenarioResult::failed("golden file was not generated"),
                });
            }
        }
        Ok(checks)
    }

    fn compare(&self, file: &str, actual: &str) -> Result<ScenarioResult> {
        let path = self.expected_dir().join(file);
        if !path.exists() {
            return Ok(ScenarioResult::failed(format!("no golden file {}", path.display())));
        }
        let expected = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(if expected == actual {
            ScenarioResult::Passed
        } else {
            ScenarioResult::Mismatch {
                expected,
                actual: actual.to_string(),
            }
        })
    }

    fn expected_files(&self) -> Result<Vec<String>> {
        let dir = self.expected_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&dir).with_context(|| format!("reading {}", dir.display()))? {
            let entry = entry?;
            if entry.path().is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();
        Ok(files)
    }
}
