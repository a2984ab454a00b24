// Error types for decoding, reduction and run metadata

use std::io;

use thiserror::Error;

use crate::event::Action;
use crate::state::Verdict;

/// A single input line that is not a test event.
///
/// Never fatal: the reducer counts the line as skipped and moves on.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("blank line")]
    Blank,

    #[error("not a test event")]
    Json(#[from] serde_json::Error),
}

/// The event stream broke the `go test -json` grammar.
#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    #[error("output for test `{test}` in package `{package}` before any `run` event")]
    OutputBeforeStart { package: String, test: String },

    #[error("`{action}` for test `{test}` in package `{package}` before any `run` event")]
    TerminalBeforeStart {
        package: String,
        test: String,
        action: Action,
    },

    #[error(
        "`{action}` for test `{test}` in package `{package}`, but the attempt already ended with `{previous}`"
    )]
    DuplicateTerminal {
        package: String,
        test: String,
        action: Action,
        previous: Verdict,
    },

    #[error("`{action}` for package `{package}`, but the package already ended with `{previous}`")]
    DuplicatePackageVerdict {
        package: String,
        action: Action,
        previous: Verdict,
    },

    #[error("unexpected action `{action}` for package `{package}`")]
    UnexpectedPackageAction { package: String, action: Action },

    #[error("unexpected action `{action}` for test `{test}` in package `{package}`")]
    UnexpectedTestAction {
        package: String,
        test: String,
        action: Action,
    },
}

/// Fatal outcome of a reduction pass.
#[derive(Debug, Error)]
pub enum ReduceError {
    #[error("protocol violation on line {line}")]
    Protocol {
        line: usize,
        #[source]
        source: ProtocolError,
    },

    #[error("failed to read event stream after line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl ReduceError {
    /// The protocol violation behind this error, if any.
    pub fn protocol(&self) -> Option<&ProtocolError> {
        match self {
            Self::Protocol { source, .. } => Some(source),
            Self::Read { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("required run metadata `{0}` is not set")]
    Missing(&'static str),

    #[error("run metadata `{name}` is not an RFC 3339 timestamp: `{value}`")]
    InvalidTimestamp {
        name: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
