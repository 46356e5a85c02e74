mod amount;
mod categorizer;
mod cli;
mod error;
mod fmt;
mod grid;
mod importer;
mod locator;
mod models;
mod quarterly;
mod reports;
mod rules;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

/// Diagnostics go to stderr so JSON on stdout stays parseable.
fn init_logging() {
    let filter = EnvFilter::try_from_env("LEDGERLENS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pnl { file, json } => cli::pnl::run(&file, json),
        Commands::Quarterly {
            file,
            json,
            trace,
            strategy,
            sum_span,
        } => cli::quarterly::run(&file, json, trace, strategy, sum_span),
        Commands::Classify {
            account,
            department,
            class,
            memo,
        } => cli::classify::run(&account, &department, &class, &memo),
        Commands::Demo { json } => cli::demo::run(json),
        Commands::Config { init } => cli::config::run(init),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
