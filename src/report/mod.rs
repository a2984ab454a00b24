// Report module - finalized run document and where it goes

pub mod console;
pub mod finalize;
pub mod json;
pub mod summary;

pub use console::{ConsoleProgress, ConsoleReporter, render_summary};
pub use finalize::{finalize, finalize_results};
pub use json::{JsonFileSink, StdoutSink};
pub use summary::{RerunTest, RunSummary, failed_attempts};

use anyhow::Result;
use serde::Serialize;

use crate::state::{TestAttempt, Verdict};

/// The whole report for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestRun {
    pub commit_sha: String,
    pub commit_date: String,
    pub job_run_date: String,
    #[serde(rename = "results")]
    pub package_results: Vec<PackageResult>,
}

/// One package with its test attempts, sorted by test name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageResult {
    pub package: String,
    pub result: Option<Verdict>,
    pub elapsed: Option<f64>,
    pub output: Vec<String>,
    pub tests: Vec<TestAttempt>,
}

/// Destination for a finished report
pub trait ReportSink {
    /// Write the report, returning a description of where it went.
    fn persist(&self, report: &TestRun) -> Result<String>;
}
