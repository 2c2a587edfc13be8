//! Command handlers

use crate::cli::{Cli, Commands};
use crate::output::{print_report, print_summaries};
use logbook_app::app::LogbookService;
use logbook_app::config::{load_config, ConfigOverrides, FileConfig};
use logbook_types::{OutputFormat, Result};
use std::path::{Path, PathBuf};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let mut overrides = cli.overrides();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Generate { output } => {
            overrides.output_file_path = output;
            cmd_generate(config_path, &overrides)
        }
        Commands::Summary { format } => cmd_summary(config_path, &overrides, format),
        Commands::Config { show, init } => cmd_config(config_path, &overrides, show, init),
    }
}

fn cmd_generate(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let report = LogbookService::new(&config)?.generate()?;
    print_report(&report);
    Ok(())
}

fn cmd_summary(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    format: OutputFormat,
) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let summaries = LogbookService::new(&config)?.summaries();
    print_summaries(format, &summaries)
}

fn cmd_config(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    show: bool,
    init: Option<PathBuf>,
) -> Result<()> {
    if let Some(path) = init {
        FileConfig::default().save(&path)?;
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    if show {
        let config = load_config(config_path, overrides)?;
        println!("{}", config);
        return Ok(());
    }

    match FileConfig::default_path() {
        Ok(path) => println!("Config file: {}", path.display()),
        Err(_) => println!("Config file: (no config directory)"),
    }
    println!("Use --show to print the resolved configuration, --init <PATH> to write defaults.");
    Ok(())
}
