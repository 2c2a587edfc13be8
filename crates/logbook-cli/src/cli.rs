//! CLI definition using clap

use clap::{Parser, Subcommand};
use logbook_app::config::ConfigOverrides;
use logbook_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fuel-logbook")]
#[command(version)]
#[command(about = "Generate a monthly vehicle mileage and travel claim workbook")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a JSON or TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// First day of the log (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub start_date: Option<String>,

    /// Last day of the log (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub end_date: Option<String>,

    /// Odometer reading at the start of the first month
    #[arg(long, global = true)]
    pub initial_odometer: Option<u64>,

    /// Work-related kilometres per workday
    #[arg(long, global = true)]
    pub km_per_day: Option<u64>,

    /// Claim rate in INR per kilometre
    #[arg(long, global = true)]
    pub rate_per_km: Option<u64>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Overrides shared by every command
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_file_path: None,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            initial_odometer: self.initial_odometer,
            work_related_km: self.km_per_day,
            inr_per_km: self.rate_per_km,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the log book workbook
    Generate {
        /// Output Excel file path (overrides config)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Print month totals without writing a workbook
    Summary {
        /// Output format (json, table)
        #[arg(long, short = 'f', default_value = "table")]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        /// Show the resolved configuration
        #[arg(long)]
        show: bool,

        /// Write the built-in defaults as a JSON config file
        #[arg(long)]
        init: Option<PathBuf>,
    },
}
