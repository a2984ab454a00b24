// Run reducer - drives decoding and routing over a whole stream

use std::collections::BTreeMap;
use std::io::BufRead;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::{ProtocolError, ReduceError};
use crate::event::{self, Action, TestEvent};
use crate::metadata::RunMetadata;
use crate::report::{self, TestRun};
use crate::state::{PackageAggregate, Verdict};

/// Hooks fired while a stream is consumed.
///
/// Only called for events that were applied successfully.
pub trait EventObserver {
    /// Called after every input line, decoded or not
    fn on_line(&self, _line: usize) {}

    fn on_attempt_start(&self, _package: &str, _test: &str) {}

    fn on_attempt_end(
        &self,
        _package: &str,
        _test: &str,
        _verdict: Verdict,
        _elapsed: Option<f64>,
    ) {
    }

    fn on_package_end(&self, _package: &str, _verdict: Verdict, _elapsed: Option<f64>) {}
}

struct NoopObserver;

impl EventObserver for NoopObserver {}

/// Line accounting, cumulative over every `consume` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsumeStats {
    pub lines: usize,
    pub events: usize,
    pub skipped: usize,
}

/// Owns every package aggregate for one reduction pass.
#[derive(Debug, Default)]
pub struct RunReducer {
    packages: BTreeMap<String, PackageAggregate>,
    stats: ConsumeStats,
}

impl RunReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package(&self, name: &str) -> Option<&PackageAggregate> {
        self.packages.get(name)
    }

    /// Packages whose own verdict is `skip`; these are left out of the report.
    pub fn skipped_packages(&self) -> usize {
        self.packages
            .values()
            .filter(|p| p.verdict() == Some(Verdict::Skip))
            .count()
    }

    /// Get or create the aggregate for `name`.
    pub fn package_mut(&mut self, name: &str) -> &mut PackageAggregate {
        self.packages
            .entry(name.to_owned())
            .or_insert_with(|| PackageAggregate::new(name))
    }

    /// Route one decoded event to its package.
    pub fn apply(&mut self, event: TestEvent) -> Result<(), ProtocolError> {
        self.stats.events += 1;
        let package = self.package_mut(&event.package);
        package.route_event(event)
    }

    /// Reduce every line of `reader` until end of input.
    pub fn consume<R: BufRead>(&mut self, reader: R) -> Result<ConsumeStats, ReduceError> {
        self.consume_observed(reader, &NoopObserver)
    }

    pub fn consume_observed<R: BufRead>(
        &mut self,
        mut reader: R,
        observer: &dyn EventObserver,
    ) -> Result<ConsumeStats, ReduceError> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ReduceError::Read {
                    line: self.stats.lines,
                    source,
                })?;
            if read == 0 {
                break;
            }

            self.stats.lines += 1;
            let line = self.stats.lines;

            match event::decode_line(&buf) {
                Ok(event) => self
                    .apply_observed(event, observer)
                    .map_err(|source| ReduceError::Protocol { line, source })?,
                Err(err) => {
                    trace!("Skipping line {}: {:?}", line, err);
                    self.stats.skipped += 1;
                }
            }

            observer.on_line(line);
        }

        debug!(
            "Consumed {} lines ({} events, {} skipped) across {} packages",
            self.stats.lines,
            self.stats.events,
            self.stats.skipped,
            self.packages.len()
        );

        Ok(self.stats)
    }

    fn apply_observed(
        &mut self,
        event: TestEvent,
        observer: &dyn EventObserver,
    ) -> Result<(), ProtocolError> {
        let package = event.package.clone();
        let test = event.test.clone();
        let action = event.action.clone();
        let elapsed = event.elapsed;

        self.apply(event)?;

        match (test.is_empty(), action.verdict()) {
            (true, Some(verdict)) => {
                info!(
                    "Package: {} Action: {} Elapsed: {}",
                    package,
                    verdict,
                    elapsed.unwrap_or_default()
                );
                observer.on_package_end(&package, verdict, elapsed);
            }
            (false, Some(verdict)) => {
                debug!("Test: {} Package: {} Action: {}", test, package, verdict);
                observer.on_attempt_end(&package, &test, verdict, elapsed);
            }
            (false, None) if action == Action::Run => {
                observer.on_attempt_start(&package, &test);
            }
            _ => {}
        }

        Ok(())
    }

    /// Hand over the aggregates, in package name order.
    pub fn into_packages(self) -> impl Iterator<Item = PackageAggregate> {
        self.packages.into_values()
    }

    /// Finalize every package and attach run metadata.
    pub fn finish(self, metadata: &RunMetadata) -> TestRun {
        report::finalize(self.into_packages(), metadata)
    }
}
