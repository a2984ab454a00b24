// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Reduce `go test -json` output into a test run report
#[derive(Parser, Debug)]
#[command(name = "test-monitor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reduce `go test -json` event streams into a JSON test run report", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Flattened so `test-monitor results.json` works without naming the
    // `process` subcommand.
    #[command(flatten)]
    pub process_args: ProcessArgs,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(short = 'c', long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub show_config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,

    /// Print shell completion script (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reduce a stream and persist the report (default)
    Process(ProcessArgs),

    /// Reduce a stream and print a summary without writing a report
    Summary(SummaryArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// `go test -json` capture to read; `-` or nothing reads stdin
    #[arg(required = false, value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Disable the progress spinner and per-package lines
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl InputArgs {
    /// Path to read, or `None` for stdin
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory the report file is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report file name prefix
    #[arg(long, value_name = "PREFIX")]
    pub file_prefix: Option<String>,

    /// Write the report to stdout instead of a file
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Commit identifier (overrides COMMIT_SHA)
    #[arg(long, value_name = "SHA")]
    pub commit_sha: Option<String>,

    /// Commit timestamp, RFC 3339 (overrides COMMIT_DATE)
    #[arg(long, value_name = "TIMESTAMP")]
    pub commit_date: Option<String>,

    /// Job start timestamp, RFC 3339 (overrides JOB_STARTED)
    #[arg(long, value_name = "TIMESTAMP")]
    pub job_started: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

impl Cli {
    /// Helper to get effective ProcessArgs
    pub fn get_process_args(&self) -> &ProcessArgs {
        match &self.command {
            Some(Commands::Process(args)) => args,
            _ => &self.process_args,
        }
    }
}
