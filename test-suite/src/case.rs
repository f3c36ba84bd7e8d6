/// Result of a single check within a case.
#[derive(Debug, Clone)]
pub enum ScenarioResult {
    Passed,
    Failed { error: String },
    /// Generated text differs from the golden file.
    Mismatch { expected: String, actual: String },
}

impl ScenarioResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioResult::Passed)
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ScenarioResult::Failed {
            error: error.into(),
        }
    }

    /// One-line description of a failure.
    pub fn summary(&self) -> String {
        match self {
            ScenarioResult::Passed => "passed".to_string(),
            ScenarioResult::Failed { error } => error.clone(),
            ScenarioResult::Mismatch { .. } => {
                "generated text differs from golden file".to_string()
            }
        }
    }

    /// Unified diff from the golden file to the generated text.
    pub fn diff(&self) -> Option<String> {
        match self {
            ScenarioResult::Mismatch { expected, actual } => Some(
                similar::TextDiff::from_lines(expected, actual)
                    .unified_diff()
                    .context_radius(3)
                    .header("expected", "actual")
                    .to_string(),
            ),
            _ => None,
        }
    }
}

/// A named check, one per artifact or expected error.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub result: ScenarioResult,
}

/// Result of running every check in a case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub checks: Vec<CheckResult>,
}

impl CaseResult {
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.result.is_passed()).count()
    }

    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.result.is_passed())
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.result.is_passed())
    }
}
