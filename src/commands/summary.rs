// Summary command - reduce a stream and print totals only

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::cli::args::SummaryArgs;
use crate::commands::open_input;
use crate::config::Config;
use crate::report::{self, ConsoleProgress, ConsoleReporter};
use crate::state::RunReducer;

pub fn handle_summary(cli: &Cli, args: &SummaryArgs, config: &Config) -> Result<()> {
    let reader = open_input(args.input.input_path())?;
    let progress = ConsoleProgress::new(
        config.progress.enabled && !args.input.no_progress && !cli.verbose,
    );

    let mut reducer = RunReducer::new();
    let consumed = reducer.consume_observed(reader, &progress);
    progress.finish();
    let stats = consumed.context("Failed to reduce event stream")?;

    let excluded = reducer.skipped_packages();
    let results = report::finalize_results(reducer.into_packages());

    ConsoleReporter::stdout().print_summary(&results, stats, excluded, None)?;
    Ok(())
}
