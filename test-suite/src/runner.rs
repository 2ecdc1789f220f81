use std::path::PathBuf;

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};
use stratiform::cfn::{Config, to_string};
use stratiform::translate_source;

use crate::case::{Case, Expectation, collect_cases};
use crate::{TestFailure, TestResults};

pub struct TestRunner {
    cases_dir: PathBuf,
    filter: Option<String>,
}

impl TestRunner {
    pub fn new(cases_dir: impl Into<PathBuf>) -> Self {
        Self {
            cases_dir: cases_dir.into(),
            filter: None,
        }
    }

    /// Only run cases whose name contains `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Discover and run all test cases
    pub fn run_all(&self) -> Result<TestResults> {
        let cases = collect_cases(&self.cases_dir).with_context(|| {
            format!("failed to collect cases in {}", self.cases_dir.display())
        })?;

        let mut results = TestResults::new();
        for case in cases {
            if let Some(filter) = &self.filter
                && !case.name.contains(filter.as_str())
            {
                continue;
            }
            match check_case(&case) {
                Ok(()) => results.add_pass(),
                Err(error) => results.add_failure(TestFailure::new(case.name, error)),
            }
        }
        Ok(results)
    }
}

/// Run one case, describing the mismatch on failure.
pub fn check_case(case: &Case) -> Result<(), String> {
    let outcome = translate_source(&case.source);
    match (&case.expectation, outcome) {
        (Expectation::Json(expected), Ok(translation)) => {
            let actual = to_string(&translation.document, &Config::default())
                .map_err(|e| format!("failed to render JSON: {e}"))?;
            if actual != *expected {
                return Err(format!("JSON mismatch:\n{}", diff(expected, &actual)));
            }
            let warnings: Vec<(String, String)> = translation
                .unresolved_references()
                .into_iter()
                .map(|r| (r.logical_id, r.location))
                .collect();
            if warnings != case.warnings {
                return Err(format!(
                    "warning mismatch:\nexpected: {:?}\nactual:   {:?}",
                    case.warnings, warnings
                ));
            }
            Ok(())
        }
        (Expectation::Json(_), Err(err)) => Err(format!("unexpected error: {err}")),
        (Expectation::Error(expected), Err(err)) => {
            let message = err.to_string();
            if message.contains(expected.as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "error mismatch:\nexpected to contain: {expected}\nactual: {message}"
                ))
            }
        }
        (Expectation::Error(expected), Ok(_)) => {
            Err(format!("expected error containing `{expected}`, but translation succeeded"))
        }
    }
}

fn diff(expected: &str, actual: &str) -> String {
    let mut out = String::new();
    for change in TextDiff::from_lines(expected, actual).iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => ' ',
        };
        out.push(sign);
        out.push_str(change.value());
        if change.missing_newline() {
            out.push('\n');
        }
    }
    out
}
