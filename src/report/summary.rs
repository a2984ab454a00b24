// Run summary - counters derived from finalized package results

use serde::Serialize;

use crate::report::PackageResult;
use crate::state::{TestAttempt, Verdict};

/// A test name that ran more than once in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RerunTest {
    pub package: String,
    pub test: String,
    pub attempts: usize,
}

/// Totals over a finalized set of package results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub packages_passed: usize,
    pub packages_failed: usize,
    pub packages_unfinished: usize,
    pub tests_passed: usize,
    pub tests_failed: usize,
    pub tests_skipped: usize,
    pub tests_unfinished: usize,
    pub reruns: Vec<RerunTest>,
}

impl RunSummary {
    pub fn from_results(results: &[PackageResult]) -> Self {
        let mut summary = Self::default();

        for package in results {
            match package.result {
                Some(Verdict::Pass) => summary.packages_passed += 1,
                Some(Verdict::Fail) => summary.packages_failed += 1,
                // skipped packages never reach the report
                Some(Verdict::Skip) => {}
                None => summary.packages_unfinished += 1,
            }

            for attempt in &package.tests {
                match attempt.verdict {
                    Some(Verdict::Pass) => summary.tests_passed += 1,
                    Some(Verdict::Fail) => summary.tests_failed += 1,
                    Some(Verdict::Skip) => summary.tests_skipped += 1,
                    None => summary.tests_unfinished += 1,
                }
            }

            // tests are sorted by name, so repeated names are adjacent
            for group in package.tests.chunk_by(|a, b| a.name == b.name) {
                if group.len() > 1 {
                    summary.reruns.push(RerunTest {
                        package: package.package.clone(),
                        test: group[0].name.clone(),
                        attempts: group.len(),
                    });
                }
            }
        }

        summary
    }

    pub fn total_tests(&self) -> usize {
        self.tests_passed + self.tests_failed + self.tests_skipped + self.tests_unfinished
    }

    pub fn all_passed(&self) -> bool {
        self.packages_failed == 0 && self.tests_failed == 0
    }
}

/// Failed attempts across all packages, in report order.
pub fn failed_attempts(results: &[PackageResult]) -> impl Iterator<Item = &TestAttempt> {
    results
        .iter()
        .flat_map(|p| p.tests.iter())
        .filter(|a| a.verdict == Some(Verdict::Fail))
}
