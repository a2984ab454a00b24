// Per-package accumulation

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::ProtocolError;
use crate::event::{Action, TestEvent};
use crate::report::PackageResult;
use crate::state::{TestAccumulator, TestAttempt, Verdict};

/// Everything seen so far for one package.
#[derive(Debug, Clone)]
pub struct PackageAggregate {
    name: String,
    output: Vec<String>,
    verdict: Option<Verdict>,
    elapsed: Option<f64>,
    // Keyed by test name so draining yields name order; attempts of one
    // name keep stream order inside the accumulator.
    tests: BTreeMap<String, TestAccumulator>,
}

impl PackageAggregate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: Vec::new(),
            verdict: None,
            elapsed: None,
            tests: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn test(&self, name: &str) -> Option<&TestAccumulator> {
        self.tests.get(name)
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    /// Fold one event for this package into the aggregate.
    pub fn route_event(&mut self, event: TestEvent) -> Result<(), ProtocolError> {
        if event.is_package_scoped() {
            self.route_package_event(event)
        } else {
            self.route_test_event(event)
        }
    }

    fn route_package_event(&mut self, event: TestEvent) -> Result<(), ProtocolError> {
        match event.action {
            Action::Output => {
                self.output.extend(event.output);
                Ok(())
            }
            Action::Pass => self.set_verdict(Verdict::Pass, event.elapsed),
            Action::Fail => self.set_verdict(Verdict::Fail, event.elapsed),
            Action::Skip => self.set_verdict(Verdict::Skip, event.elapsed),
            action => Err(ProtocolError::UnexpectedPackageAction {
                package: self.name.clone(),
                action,
            }),
        }
    }

    fn set_verdict(
        &mut self,
        verdict: Verdict,
        elapsed: Option<f64>,
    ) -> Result<(), ProtocolError> {
        if let Some(previous) = self.verdict {
            return Err(ProtocolError::DuplicatePackageVerdict {
                package: self.name.clone(),
                action: verdict.into(),
                previous,
            });
        }
        self.verdict = Some(verdict);
        self.elapsed = elapsed;
        Ok(())
    }

    fn route_test_event(&mut self, event: TestEvent) -> Result<(), ProtocolError> {
        let TestEvent {
            action,
            test,
            output,
            elapsed,
            ..
        } = event;

        match action {
            Action::Run => {
                self.tests
                    .entry(test)
                    .or_insert_with_key(|name| TestAccumulator::new(&self.name, name.as_str()))
                    .on_start();
                Ok(())
            }
            Action::Output => match self.tests.get_mut(&test) {
                // no text, no line
                Some(acc) => output.map_or(Ok(()), |text| acc.on_output(text)),
                None => Err(ProtocolError::OutputBeforeStart {
                    package: self.name.clone(),
                    test,
                }),
            },
            Action::Pass => self.finish_test(test, Verdict::Pass, elapsed),
            Action::Fail => self.finish_test(test, Verdict::Fail, elapsed),
            Action::Skip => self.finish_test(test, Verdict::Skip, elapsed),
            Action::Pause | Action::Cont => {
                if let Some(acc) = self.tests.get(&test) {
                    acc.on_pause_or_resume();
                }
                Ok(())
            }
            Action::Other(_) => Err(ProtocolError::UnexpectedTestAction {
                package: self.name.clone(),
                test,
                action,
            }),
        }
    }

    fn finish_test(
        &mut self,
        test: String,
        verdict: Verdict,
        elapsed: Option<f64>,
    ) -> Result<(), ProtocolError> {
        match self.tests.get_mut(&test) {
            Some(acc) => acc.on_terminal(verdict, elapsed),
            None => Err(ProtocolError::TerminalBeforeStart {
                package: self.name.clone(),
                test,
                action: verdict.into(),
            }),
        }
    }

    /// Drain the working test map into a sorted result.
    ///
    /// Returns `None` when the package itself was skipped; such packages are
    /// left out of the report. The working map is empty afterwards either way.
    pub fn finalize(&mut self) -> Option<PackageResult> {
        let tests: Vec<TestAttempt> = std::mem::take(&mut self.tests)
            .into_values()
            .flat_map(TestAccumulator::into_attempts)
            .collect();

        if self.verdict == Some(Verdict::Skip) {
            debug!(
                "Dropping skipped package {} ({} test attempts)",
                self.name,
                tests.len()
            );
            return None;
        }

        if self.verdict.is_none() {
            warn!("Package {} never reported a result", self.name);
        }
        for attempt in tests.iter().filter(|a| !a.is_finished()) {
            warn!(
                "Test {} in {} never reported a result",
                attempt.name, attempt.package
            );
        }

        Some(PackageResult {
            package: self.name.clone(),
            result: self.verdict,
            elapsed: self.elapsed,
            output: std::mem::take(&mut self.output),
            tests,
        })
    }
}
