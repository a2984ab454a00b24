// Process command - reduce a stream and persist the report

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::Cli;
use crate::cli::args::ProcessArgs;
use crate::commands::open_input;
use crate::config::Config;
use crate::metadata::RunMetadata;
use crate::report::{ConsoleProgress, ConsoleReporter, JsonFileSink, ReportSink, StdoutSink};
use crate::state::RunReducer;

pub fn handle_process(cli: &Cli, args: &ProcessArgs, config: &Config) -> Result<()> {
    // Metadata problems are fatal before any input is read
    let metadata = RunMetadata::from_env_with_overrides(
        args.commit_sha.as_deref(),
        args.commit_date.as_deref(),
        args.job_started.as_deref(),
    )
    .context("Invalid run metadata")?;

    info!("Commit: {}", metadata.commit_sha);
    info!("Commit date: {}", metadata.commit_date_string());
    info!("Job started: {}", metadata.job_started_string());

    let reader = open_input(args.input.input_path())?;
    let progress = ConsoleProgress::new(
        config.progress.enabled && !args.input.no_progress && !cli.verbose,
    );

    let mut reducer = RunReducer::new();
    let consumed = reducer.consume_observed(reader, &progress);
    progress.finish();
    let stats = consumed.context("Failed to reduce event stream")?;

    let excluded = reducer.skipped_packages();
    let report = reducer.finish(&metadata);

    let pretty = config.output.pretty && !args.compact;
    let sink: Box<dyn ReportSink> = if args.stdout {
        Box::new(StdoutSink::new(pretty))
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| config.output.dir.clone().into());
        let prefix = args
            .file_prefix
            .clone()
            .unwrap_or_else(|| config.output.file_prefix.clone());
        Box::new(JsonFileSink::new(dir, prefix).pretty(pretty))
    };

    let location = sink.persist(&report)?;
    info!("Report written to {}", location);

    let console = if args.stdout {
        ConsoleReporter::stderr()
    } else {
        ConsoleReporter::stdout()
    };
    console.print_summary(&report.package_results, stats, excluded, Some(&location))?;

    Ok(())
}
