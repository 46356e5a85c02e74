pub mod classify;
pub mod config;
pub mod demo;
pub mod pnl;
pub mod quarterly;
pub mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::locator::StrategyChoice;
use crate::settings::{OutputFormat, Settings};

#[derive(Parser)]
#[command(
    name = "ledgerlens",
    version,
    about = "Turns accounting exports into a categorized P&L or a department income statement."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a P&L from a transaction-detail export (CSV, XLSX or XLS).
    Pnl {
        /// Path to the export
        file: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Extract a department-by-department income statement (XLSX or XLS).
    Quarterly {
        /// Path to the workbook
        file: PathBuf,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
        /// Include extraction diagnostics
        #[arg(long)]
        trace: bool,
        /// How department columns are found (default: from settings)
        #[arg(long, value_enum)]
        strategy: Option<StrategyChoice>,
        /// Sum every column under a department instead of reading its total column
        #[arg(long = "sum-span")]
        sum_span: bool,
    },
    /// Show how one row would be classified.
    Classify {
        #[arg(long)]
        account: String,
        #[arg(long, default_value = "")]
        department: String,
        #[arg(long, default_value = "")]
        class: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    /// Run the P&L over a built-in set of sample transactions.
    Demo {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the effective settings, or write the defaults with --init.
    Config {
        #[arg(long)]
        init: bool,
    },
}

/// JSON when asked for on the command line or configured as the default.
pub(crate) fn wants_json(flag: bool, settings: &Settings) -> bool {
    flag || settings.output == OutputFormat::Json
}
