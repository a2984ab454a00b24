// Main entry point for test-monitor

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use test_monitor::cli::{Cli, Commands};
use test_monitor::commands;
use test_monitor::config::Config;
use test_monitor::logging;

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if let Err(err) = run(&cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!("Starting test-monitor v{}", env!("CARGO_PKG_VERSION"));

    // Handle completion flag
    if let Some(shell_type) = &cli.completion {
        return commands::handle_completion(shell_type);
    }

    // Handle init_config flag
    if let Some(config_file) = &cli.init_config {
        return commands::handle_init_config(config_file);
    }

    let (config, source) = match &cli.config_file {
        Some(path) => (
            Some(Config::load_from_file(path).context("Failed to load configuration")?),
            Some(path.clone()),
        ),
        None => {
            let source = Config::discover();
            let config = source
                .as_deref()
                .map(Config::load_from_file)
                .transpose()
                .context("Failed to load configuration")?;
            (config, source)
        }
    };

    if cli.show_config {
        commands::handle_show_config(config.as_ref(), source.as_deref());
        return Ok(());
    }

    let config = config.unwrap_or_default();
    if cli.no_color || !config.progress.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match &cli.command {
        Some(Commands::Process(args)) => commands::handle_process(cli, args, &config),
        Some(Commands::Summary(args)) => commands::handle_summary(cli, args, &config),
        // Implicit process
        None => commands::handle_process(cli, cli.get_process_args(), &config),
    }
}
