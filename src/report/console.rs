// Console output - live progress while reducing and the final summary

use std::fmt::Write as _;
use std::time::Duration;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};

use crate::report::PackageResult;
use crate::report::summary::{RunSummary, failed_attempts};
use crate::state::{ConsumeStats, EventObserver, Verdict};

const RULE_HEAVY: &str =
    "════════════════════════════════════════════════════════════════════════════════";
const RULE_LIGHT: &str =
    "────────────────────────────────────────────────────────────────────────────────";

/// Spinner on stderr that follows the stream as it is reduced.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) =
                ProgressStyle::default_spinner().template("{spinner} {pos} lines {msg}")
            {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        } else {
            ProgressBar::hidden()
        };

        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn verdict_label(verdict: Verdict) -> String {
    match verdict {
        Verdict::Pass => style("PASS").green().bold().for_stderr().to_string(),
        Verdict::Fail => style("FAIL").red().bold().for_stderr().to_string(),
        Verdict::Skip => style("SKIP").yellow().for_stderr().to_string(),
    }
}

impl EventObserver for ConsoleProgress {
    fn on_line(&self, line: usize) {
        self.bar.set_position(line as u64);
    }

    fn on_attempt_start(&self, package: &str, test: &str) {
        self.bar.set_message(format!("{} {}", package, test));
    }

    fn on_package_end(&self, package: &str, verdict: Verdict, elapsed: Option<f64>) {
        self.bar.println(format!(
            "{} {} ({:.3}s)",
            verdict_label(verdict),
            package,
            elapsed.unwrap_or_default()
        ));
    }
}

/// Prints the end-of-run summary.
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    /// Summary on stdout
    pub fn stdout() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Summary on stderr, used when stdout carries the report itself
    pub fn stderr() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    pub fn print_summary(
        &self,
        results: &[PackageResult],
        stats: ConsumeStats,
        excluded_packages: usize,
        location: Option<&str>,
    ) -> std::io::Result<()> {
        self.term
            .write_str(&render_summary(results, stats, excluded_packages, location))
    }
}

/// Render the summary block as plain text with console styling.
pub fn render_summary(
    results: &[PackageResult],
    stats: ConsumeStats,
    excluded_packages: usize,
    location: Option<&str>,
) -> String {
    let summary = RunSummary::from_results(results);
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE_HEAVY);
    if summary.all_passed() {
        let _ = writeln!(
            out,
            "{}",
            style(format!(
                "✅ PASSED ({} packages, {} tests)",
                summary.packages_passed,
                summary.total_tests()
            ))
            .green()
        );
    } else {
        let _ = writeln!(
            out,
            "{}",
            style(format!(
                "❌ FAILED ({} packages failed, {} tests failed)",
                summary.packages_failed, summary.tests_failed
            ))
            .red()
        );
    }
    let _ = writeln!(out, "{}", RULE_LIGHT);

    let _ = writeln!(out, "📊 Packages:");
    let _ = writeln!(out, "   • Passed: {}", summary.packages_passed);
    let _ = writeln!(out, "   • Failed: {}", summary.packages_failed);
    let _ = writeln!(out, "   • Skipped (excluded): {}", excluded_packages);
    if summary.packages_unfinished > 0 {
        let _ = writeln!(out, "   • Without result: {}", summary.packages_unfinished);
    }

    let _ = writeln!(out, "📊 Tests:");
    let _ = writeln!(out, "   • Total attempts: {}", summary.total_tests());
    let _ = writeln!(out, "   • Passed: {}", summary.tests_passed);
    let _ = writeln!(out, "   • Failed: {}", summary.tests_failed);
    let _ = writeln!(out, "   • Skipped: {}", summary.tests_skipped);
    if summary.tests_unfinished > 0 {
        let _ = writeln!(out, "   • Without result: {}", summary.tests_unfinished);
    }

    if !summary.reruns.is_empty() {
        let _ = writeln!(out, "🔁 Re-run tests:");
        for rerun in &summary.reruns {
            let _ = writeln!(
                out,
                "   • {} {} ({} attempts)",
                rerun.package, rerun.test, rerun.attempts
            );
        }
    }

    let failed: Vec<_> = failed_attempts(results).collect();
    if !failed.is_empty() {
        let _ = writeln!(out, "❌ Failed Tests:");
        for attempt in failed {
            let _ = writeln!(
                out,
                "   • {} {} ({:.3}s)",
                attempt.package,
                attempt.name,
                attempt.elapsed.unwrap_or_default()
            );
        }
    }

    let _ = writeln!(out, "{}", RULE_LIGHT);
    let _ = writeln!(
        out,
        "🔧 Input: {} lines, {} events, {} skipped",
        stats.lines, stats.events, stats.skipped
    );
    if let Some(location) = location {
        let _ = writeln!(out, "💾 Report: {}", location);
    }
    let _ = writeln!(out, "{}", RULE_HEAVY);

    out
}
