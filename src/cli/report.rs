use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::fmt::{amount, money, percent};
use crate::importer::ImportSummary;
use crate::models::{ExtractionTrace, PlCategory, PlReport, QuarterlyReport};

fn money_cell(val: f64) -> Cell {
    Cell::new(money(val)).set_alignment(CellAlignment::Right)
}

fn blank_row(table: &mut Table) {
    table.add_row(vec![Cell::new(""), Cell::new(""), Cell::new(""), Cell::new("")]);
}

fn add_category(table: &mut Table, cat: &PlCategory) {
    table.add_row(vec![
        Cell::new(cat.name.as_str().bold()),
        money_cell(cat.headcount),
        money_cell(cat.non_headcount),
        money_cell(cat.total),
    ]);
    for sub in cat.subcategories.values() {
        table.add_row(vec![
            Cell::new(format!("  {}", sub.name)),
            money_cell(sub.headcount),
            money_cell(sub.non_headcount),
            money_cell(sub.total),
        ]);
    }
}

// ---------------------------------------------------------------------------
// P&L
// ---------------------------------------------------------------------------

pub fn format_pnl(pnl: &PlReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Headcount", "Non-headcount", "Total"]);

    table.add_row(vec![
        Cell::new("REVENUE".green().bold()),
        Cell::new(""),
        Cell::new(""),
        money_cell(pnl.revenue),
    ]);
    blank_row(&mut table);

    add_category(&mut table, &pnl.cogs);
    table.add_row(vec![
        Cell::new("Gross Profit".bold()),
        Cell::new(""),
        Cell::new(percent(pnl.gross_margin)).set_alignment(CellAlignment::Right),
        money_cell(pnl.gross_profit),
    ]);
    blank_row(&mut table);

    table.add_row(vec![
        Cell::new("OPERATING EXPENSES".red().bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);
    for cat in pnl.opex.values() {
        add_category(&mut table, cat);
    }
    table.add_row(vec![
        Cell::new("Total OpEx".bold()),
        Cell::new(""),
        Cell::new(""),
        money_cell(pnl.total_opex),
    ]);
    blank_row(&mut table);

    let ebitda_label = if pnl.ebitda >= 0.0 {
        "EBITDA".green().bold()
    } else {
        "EBITDA".red().bold()
    };
    table.add_row(vec![
        Cell::new(ebitda_label),
        Cell::new(""),
        Cell::new(""),
        money_cell(pnl.ebitda),
    ]);

    format!("Profit & Loss\n{table}")
}

pub fn format_import_summary(summary: &ImportSummary, unclassified: usize) -> String {
    let mut line = format!(
        "{} rows read, {} left out (no matching rule)",
        summary.rows, unclassified
    );
    if summary.bad_amounts > 0 {
        line.push_str(&format!(
            ", {} with unreadable amounts counted as 0",
            summary.bad_amounts
        ));
    }
    line
}

// ---------------------------------------------------------------------------
// Quarterly income statement
// ---------------------------------------------------------------------------

pub fn format_quarterly(report: &QuarterlyReport) -> String {
    let mut out = String::new();
    let title = match (report.company_name.is_empty(), report.period.is_empty()) {
        (false, false) => format!("{} ({})", report.company_name, report.period),
        (false, true) => report.company_name.clone(),
        (true, false) => report.period.clone(),
        (true, true) => "Income Statement".to_string(),
    };
    out.push_str(&format!("{}\n", title.bold()));

    for dept in report.departments.values() {
        let mut table = Table::new();
        table.set_header(vec!["Line item", "Amount"]);
        for (label, value) in &dept.line_items {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(amount(*value)).set_alignment(CellAlignment::Right),
            ]);
        }
        table.add_row(vec![
            Cell::new("Total".bold()),
            Cell::new(amount(dept.total)).set_alignment(CellAlignment::Right),
        ]);
        out.push_str(&format!("\n{}\n{table}\n", dept.department.cyan().bold()));
    }

    let mut summary = Table::new();
    summary.set_header(vec!["Department", "Total"]);
    for (name, total) in &report.summary {
        summary.add_row(vec![
            Cell::new(name),
            Cell::new(amount(*total)).set_alignment(CellAlignment::Right),
        ]);
    }
    summary.add_row(vec![
        Cell::new("Revenue total".green().bold()),
        Cell::new(amount(report.revenue_total)).set_alignment(CellAlignment::Right),
    ]);
    out.push_str(&format!("\nSummary\n{summary}"));
    out
}

pub fn format_trace(trace: &ExtractionTrace) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Department", "Columns", "Total column", "Rule"]);
    for d in &trace.departments {
        table.add_row(vec![
            Cell::new(&d.name),
            Cell::new(format!("{}-{}", d.start_column, d.end_column)),
            Cell::new(d.total_column),
            Cell::new(d.rule),
        ]);
    }

    let mut out = format!(
        "Extraction trace\n  strategy: {}\n  rows: {} total, {} line items, {} values\n{table}",
        trace.strategy, trace.total_rows, trace.rows_processed, trace.values_found
    );
    for sample in &trace.samples {
        out.push_str(&format!("\n  sample: {sample}"));
    }
    for note in &trace.notes {
        out.push_str(&format!("\n  {} {note}", "note:".yellow()));
    }
    out
}
