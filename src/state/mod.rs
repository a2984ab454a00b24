// State module - reduction of the event stream
// Attempts fold into packages, packages into the run reducer

pub mod attempt;
pub mod package;
pub mod reducer;

pub use attempt::{TestAccumulator, TestAttempt};
pub use package::PackageAggregate;
pub use reducer::{ConsumeStats, EventObserver, RunReducer};

use serde::Serialize;
use std::fmt;

/// Terminal outcome of a test attempt or a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
