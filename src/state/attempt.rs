// Per-test accumulation of attempts

use serde::Serialize;
use tracing::debug;

use crate::error::ProtocolError;
use crate::state::Verdict;

/// One `run`-to-terminal lifecycle of a test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestAttempt {
    #[serde(rename = "test")]
    pub name: String,
    pub package: String,
    pub output: Vec<String>,
    /// `None` until the terminal event arrives.
    #[serde(rename = "result")]
    pub verdict: Option<Verdict>,
    pub elapsed: Option<f64>,
}

impl TestAttempt {
    fn new(package: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            package: package.to_string(),
            output: Vec::new(),
            verdict: None,
            elapsed: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.verdict.is_some()
    }
}

/// All attempts of a single test name within one package, in stream order.
///
/// The current attempt is always the last one; a new `run` pushes a fresh
/// attempt instead of reusing a finished one.
#[derive(Debug, Clone)]
pub struct TestAccumulator {
    package: String,
    name: String,
    attempts: Vec<TestAttempt>,
}

impl TestAccumulator {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            attempts: Vec::new(),
        }
    }

    pub fn attempts(&self) -> &[TestAttempt] {
        &self.attempts
    }

    pub fn current(&self) -> Option<&TestAttempt> {
        self.attempts.last()
    }

    pub fn on_start(&mut self) {
        if self.attempts.last().is_some_and(|a| !a.is_finished()) {
            debug!(
                "Test {} in {} restarted before finishing, starting attempt {}",
                self.name,
                self.package,
                self.attempts.len() + 1
            );
        }
        self.attempts.push(TestAttempt::new(&self.package, &self.name));
    }

    /// Append a line of output to the current attempt.
    ///
    /// Lines that arrive after the attempt's verdict still belong to it.
    pub fn on_output(&mut self, text: impl Into<String>) -> Result<(), ProtocolError> {
        match self.attempts.last_mut() {
            Some(attempt) => {
                attempt.output.push(text.into());
                Ok(())
            }
            None => Err(ProtocolError::OutputBeforeStart {
                package: self.package.clone(),
                test: self.name.clone(),
            }),
        }
    }

    pub fn on_terminal(
        &mut self,
        verdict: Verdict,
        elapsed: Option<f64>,
    ) -> Result<(), ProtocolError> {
        let Some(attempt) = self.attempts.last_mut() else {
            return Err(ProtocolError::TerminalBeforeStart {
                package: self.package.clone(),
                test: self.name.clone(),
                action: verdict.into(),
            });
        };

        if let Some(previous) = attempt.verdict {
            return Err(ProtocolError::DuplicateTerminal {
                package: self.package.clone(),
                test: self.name.clone(),
                action: verdict.into(),
                previous,
            });
        }

        attempt.verdict = Some(verdict);
        attempt.elapsed = elapsed;
        Ok(())
    }

    /// `pause`/`cont` only mark scheduling of parallel tests.
    pub fn on_pause_or_resume(&self) {}

    pub fn into_attempts(self) -> Vec<TestAttempt> {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_attempt_lifecycle() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        acc.on_start();
        acc.on_output("=== RUN   TestA\n").unwrap();
        acc.on_output("--- PASS: TestA (0.01s)\n").unwrap();
        acc.on_terminal(Verdict::Pass, Some(0.01)).unwrap();

        let attempts = acc.into_attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].name, "TestA");
        assert_eq!(attempts[0].package, "pkg");
        assert_eq!(attempts[0].verdict, Some(Verdict::Pass));
        assert_eq!(attempts[0].elapsed, Some(0.01));
        assert_eq!(
            attempts[0].output,
            vec!["=== RUN   TestA\n", "--- PASS: TestA (0.01s)\n"]
        );
    }

    #[test]
    fn test_rerun_creates_new_attempt() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        acc.on_start();
        acc.on_output("first\n").unwrap();
        acc.on_terminal(Verdict::Fail, Some(0.2)).unwrap();
        acc.on_start();
        acc.on_output("second\n").unwrap();
        acc.on_terminal(Verdict::Pass, Some(0.1)).unwrap();

        let attempts = acc.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].output, vec!["first\n"]);
        assert_eq!(attempts[0].verdict, Some(Verdict::Fail));
        assert_eq!(attempts[1].output, vec!["second\n"]);
        assert_eq!(attempts[1].verdict, Some(Verdict::Pass));
    }

    #[test]
    fn test_restart_before_terminal_targets_latest() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        acc.on_start();
        acc.on_start();
        acc.on_terminal(Verdict::Pass, Some(0.0)).unwrap();

        let attempts = acc.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].verdict, None);
        assert_eq!(attempts[1].verdict, Some(Verdict::Pass));
    }

    #[test]
    fn test_output_before_start_is_rejected() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        let err = acc.on_output("orphan\n").unwrap_err();
        assert_eq!(
            err,
            ProtocolError::OutputBeforeStart {
                package: "pkg".to_string(),
                test: "TestA".to_string(),
            }
        );
    }

    #[test]
    fn test_terminal_before_start_is_rejected() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        let err = acc.on_terminal(Verdict::Fail, None).unwrap_err();
        assert!(matches!(err, ProtocolError::TerminalBeforeStart { .. }));
    }

    #[test]
    fn test_second_terminal_is_rejected() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        acc.on_start();
        acc.on_terminal(Verdict::Pass, Some(0.5)).unwrap();
        let err = acc.on_terminal(Verdict::Fail, Some(0.6)).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::DuplicateTerminal {
                previous: Verdict::Pass,
                ..
            }
        ));
        assert_eq!(acc.current().and_then(|a| a.elapsed), Some(0.5));
    }

    #[test]
    fn test_output_after_terminal_stays_with_attempt() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        acc.on_start();
        acc.on_terminal(Verdict::Pass, Some(0.0)).unwrap();
        acc.on_output("trailing\n").unwrap();
        assert_eq!(acc.current().unwrap().output, vec!["trailing\n"]);
    }

    #[test]
    fn test_attempt_serializes_with_report_field_names() {
        let mut acc = TestAccumulator::new("pkg", "TestA");
        acc.on_start();
        acc.on_terminal(Verdict::Skip, Some(0.0)).unwrap();
        let value = serde_json::to_value(acc.current().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "test": "TestA",
                "package": "pkg",
                "output": [],
                "result": "skip",
                "elapsed": 0.0
            })
        );
    }
}
