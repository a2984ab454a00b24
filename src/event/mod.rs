// Event module - decoding of `go test -json` lines

pub mod action;

pub use action::Action;

use serde::Deserialize;

use crate::error::DecodeError;

/// One record of a `go test -json` stream.
///
/// `Action` and `Package` are required; every other field is optional on
/// the wire and defaults to empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestEvent {
    /// Wall-clock time of the event. Informational only.
    #[serde(rename = "Time", default)]
    pub time: Option<String>,

    #[serde(rename = "Action")]
    pub action: Action,

    #[serde(rename = "Package")]
    pub package: String,

    /// Empty for package-scoped events.
    #[serde(rename = "Test", default)]
    pub test: String,

    #[serde(rename = "Output", default)]
    pub output: Option<String>,

    /// Seconds, present on pass/fail/skip.
    #[serde(rename = "Elapsed", default)]
    pub elapsed: Option<f64>,
}

impl TestEvent {
    /// Build an event by hand, mostly useful in tests.
    pub fn new(action: Action, package: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            time: None,
            action,
            package: package.into(),
            test: test.into(),
            output: None,
            elapsed: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_elapsed(mut self, elapsed: f64) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    pub fn is_package_scoped(&self) -> bool {
        self.test.is_empty()
    }
}

/// Decode one line of the stream.
///
/// Test binaries and the go tool may interleave plain-text diagnostics with
/// the JSON records, so callers are expected to skip lines that fail here.
pub fn decode_line(line: &[u8]) -> Result<TestEvent, DecodeError> {
    let trimmed = line.trim_ascii();
    if trimmed.is_empty() {
        return Err(DecodeError::Blank);
    }
    Ok(serde_json::from_slice(trimmed)?)
}
