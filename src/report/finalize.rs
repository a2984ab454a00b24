// Finalizer - turns package aggregates into the immutable report

use tracing::debug;

use crate::metadata::RunMetadata;
use crate::report::{PackageResult, TestRun};
use crate::state::PackageAggregate;

/// Finalize every package, dropping skipped ones, sorted by package name.
pub fn finalize_results<I>(packages: I) -> Vec<PackageResult>
where
    I: IntoIterator<Item = PackageAggregate>,
{
    let mut results: Vec<PackageResult> = packages
        .into_iter()
        .filter_map(|mut package| package.finalize())
        .collect();
    results.sort_by(|a, b| a.package.cmp(&b.package));
    results
}

/// Build the report for a run.
///
/// Metadata is taken as already validated; see [`RunMetadata::parse`].
pub fn finalize<I>(packages: I, metadata: &RunMetadata) -> TestRun
where
    I: IntoIterator<Item = PackageAggregate>,
{
    let package_results = finalize_results(packages);
    debug!(
        "Finalized {} packages for commit {}",
        package_results.len(),
        metadata.commit_sha
    );

    TestRun {
        commit_sha: metadata.commit_sha.clone(),
        commit_date: metadata.commit_date_string(),
        job_run_date: metadata.job_started_string(),
        package_results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Action, TestEvent};
    use crate::state::Verdict;

    fn metadata() -> RunMetadata {
        RunMetadata::parse(
            Some("46baf6c6be29af9c040bc14195e195848598bbae"),
            Some("2021-09-21T18:06:25-07:00"),
            Some("2021-09-21T21:06:25-07:00"),
        )
        .unwrap()
    }

    fn package(name: &str, verdict: Action) -> PackageAggregate {
        let mut pkg = PackageAggregate::new(name);
        pkg.route_event(TestEvent::new(Action::Run, name, "TestA")).unwrap();
        pkg.route_event(TestEvent::new(verdict.clone(), name, "TestA").with_elapsed(0.1)).unwrap();
        pkg.route_event(TestEvent::new(verdict, name, "").with_elapsed(0.2)).unwrap();
        pkg
    }

    #[test]
    fn test_packages_are_sorted_and_skips_dropped() {
        let packages = vec![
            package("example.com/zeta", Action::Pass),
            package("example.com/alpha", Action::Fail),
            package("example.com/skipped", Action::Skip),
            package("example.com/beta", Action::Pass),
        ];

        let report = finalize(packages, &metadata());
        let names: Vec<_> = report
            .package_results
            .iter()
            .map(|p| p.package.as_str())
            .collect();
        assert_eq!(
            names,
            ["example.com/alpha", "example.com/beta", "example.com/zeta"]
        );
        assert_eq!(report.package_results[0].result, Some(Verdict::Fail));
    }

    #[test]
    fn test_metadata_is_attached() {
        let report = finalize(Vec::new(), &metadata());
        assert_eq!(report.commit_sha, "46baf6c6be29af9c040bc14195e195848598bbae");
        assert_eq!(report.commit_date, "2021-09-21T18:06:25-07:00");
        assert_eq!(report.job_run_date, "2021-09-21T21:06:25-07:00");
        assert!(report.package_results.is_empty());
    }

    #[test]
    fn test_report_document_shape() {
        let report = finalize(vec![package("p", Action::Pass)], &metadata());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "commit_sha": "46baf6c6be29af9c040bc14195e195848598bbae",
                "commit_date": "2021-09-21T18:06:25-07:00",
                "job_run_date": "2021-09-21T21:06:25-07:00",
                "results": [{
                    "package": "p",
                    "result": "pass",
                    "elapsed": 0.2,
                    "output": [],
                    "tests": [{
                        "test": "TestA",
                        "package": "p",
                        "output": [],
                        "result": "pass",
                        "elapsed": 0.1
                    }]
                }]
            })
        );
    }
}
