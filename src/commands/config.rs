// Config commands - show effective configuration, write defaults

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{self, Config};
use crate::metadata::{ENV_COMMIT_DATE, ENV_COMMIT_SHA, ENV_JOB_STARTED};

pub fn handle_show_config(config: Option<&Config>, source: Option<&Path>) {
    println!("Current configuration:");

    match (config, source) {
        (Some(cfg), source) => {
            match source {
                Some(path) => println!("\n  Configuration file loaded: {}", path.display()),
                None => println!("\n  Configuration file loaded:"),
            }
            println!("    Output dir: {}", cfg.output.dir);
            println!("    File prefix: {}", cfg.output.file_prefix);
            println!("    Pretty JSON: {}", cfg.output.pretty);
            println!(
                "    Progress: {}",
                if cfg.progress.enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            println!(
                "    Color: {}",
                if cfg.progress.color {
                    "enabled"
                } else {
                    "disabled"
                }
            );
        }
        (None, _) => {
            println!("\n  No configuration file loaded");
            println!("  Create one with: test-monitor --init-config .testmonitorrc.toml");
            println!("    Output dir: {} (default)", config::default_output_dir());
            println!("    File prefix: {} (default)", config::default_file_prefix());
        }
    }

    println!("\n  Environment variables:");
    for name in [ENV_COMMIT_SHA, ENV_COMMIT_DATE, ENV_JOB_STARTED] {
        match std::env::var(name) {
            Ok(value) => println!("    {}: {}", name, value),
            Err(_) => println!("    {}: not set (required unless passed as a flag)", name),
        }
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Built-in defaults (lowest)");
}

pub fn handle_init_config(path: &Path) -> Result<()> {
    let toml_content = Config::default().to_toml();
    std::fs::write(path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    println!("Configuration file created: {}", path.display());
    println!("\nYou can now edit the file to customize your settings.");
    Ok(())
}
