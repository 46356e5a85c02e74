use std::path::Path;

use crate::cli::report::{format_import_summary, format_pnl};
use crate::cli::wants_json;
use crate::error::Result;
use crate::importer::{load_transactions, ImportSummary};
use crate::models::Transaction;
use crate::reports::{count_unclassified, generate_pl_report};
use crate::settings::load_settings;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let settings = load_settings();
    let (transactions, summary) = load_transactions(file)?;
    print_pnl(&transactions, &summary, wants_json(json, &settings))
}

/// Shared by `pnl` and `demo`.
pub(crate) fn print_pnl(
    transactions: &[Transaction],
    summary: &ImportSummary,
    json: bool,
) -> Result<()> {
    let report = generate_pl_report(transactions);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_pnl(&report));
        println!(
            "{}",
            format_import_summary(summary, count_unclassified(transactions))
        );
    }
    Ok(())
}
