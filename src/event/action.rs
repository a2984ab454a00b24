// Action vocabulary of `go test -json`

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::state::Verdict;

/// What a single event reports.
///
/// Unknown actions are kept verbatim so the reducer can name them in a
/// protocol violation instead of dropping the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Run,
    Output,
    Pause,
    Cont,
    Pass,
    Fail,
    Skip,
    Other(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Run => "run",
            Self::Output => "output",
            Self::Pause => "pause",
            Self::Cont => "cont",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Other(s) => s,
        }
    }

    /// The verdict carried by a terminal action.
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Pass => Some(Verdict::Pass),
            Self::Fail => Some(Verdict::Fail),
            Self::Skip => Some(Verdict::Skip),
            _ => None,
        }
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "run" => Self::Run,
            "output" => Self::Output,
            "pause" => Self::Pause,
            "cont" => Self::Cont,
            "pass" => Self::Pass,
            "fail" => Self::Fail,
            "skip" => Self::Skip,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<Verdict> for Action {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Pass => Self::Pass,
            Verdict::Fail => Self::Fail,
            Verdict::Skip => Self::Skip,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Action::from(raw.as_str()))
    }
}
