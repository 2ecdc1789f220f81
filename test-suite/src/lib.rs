//! Case-file driven end-to-end tests for the Stratiform translator.
//!
//! Every `cases/**/<name>.stf` is one case. Its siblings say what to expect:
//!
//! - `<name>.json`: the exact pretty-printed output,
//! - `<name>.error`: a substring of the error message,
//! - `<name>.warnings`: unresolved references, one `LogicalId Location` per line.
//!
//! A case needs either a `.json` or an `.error` file.

use std::path::{Path, PathBuf};

pub mod case;
pub mod runner;

pub use case::{Case, CollectCasesError, Expectation, collect_cases};
pub use runner::{TestRunner, check_case};

/// Default location of the case files.
pub fn cases_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("cases")
}

/// The result of running all test cases
#[derive(Debug, Default)]
pub struct TestResults {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub failures: Vec<TestFailure>,
}

impl TestResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn add_failure(&mut self, failure: TestFailure) {
        self.total += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Debug, Clone)]
pub struct TestFailure {
    pub test_name: String,
    pub error: String,
}

impl TestFailure {
    pub fn new(test_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            error: error.into(),
        }
    }
}
