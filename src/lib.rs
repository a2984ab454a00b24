pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metadata;
pub mod report;
pub mod state;
pub mod time;

pub use error::{DecodeError, MetadataError, ProtocolError, ReduceError};
pub use event::{Action, TestEvent, decode_line};
pub use metadata::RunMetadata;
pub use report::{PackageResult, ReportSink, TestRun};
pub use state::{RunReducer, TestAttempt, Verdict};
