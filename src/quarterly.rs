//! Department-by-department income statement extraction.
//!
//! The sheet layout is fixed by [`Layout`]: company cue in the first rows,
//! period cue on its own row, department group headers on the header row
//! and line items from `data_start_row` down. Which column holds each
//! department's numbers is left to [`crate::locator`].

use std::path::Path;

use crate::amount::parse_amount_or_zero;
use crate::error::{LedgerError, Result};
use crate::grid::{file_kind, load_grid, FileKind, Grid};
use crate::locator::{locate_departments, StrategyChoice};
use crate::models::{DepartmentColumn, DepartmentData, ExtractionTrace, QuarterlyReport};
use crate::settings::Layout;

const COMPANY_CUES: &[&str] = &["Inc", "LLC", "Corp"];
const PERIOD_CUES: &[&str] = &["Q", "2024", "2025"];
const SKIP_LABEL: &str = "Financial";
const MAX_SAMPLES: usize = 3;

/// How a department's value is read from a line-item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    /// The single cell at the department's total column.
    #[default]
    TotalColumn,
    /// Every cell across the department's span, summed.
    SpanSum,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub layout: Layout,
    pub strategy: StrategyChoice,
    pub value_mode: ValueMode,
}

/// Load an income statement workbook and extract it. CSV exports carry no
/// merge metadata and are refused.
pub fn load_quarterly(
    path: &Path,
    opts: &ExtractOptions,
) -> Result<(QuarterlyReport, ExtractionTrace)> {
    if file_kind(path)? == FileKind::Csv {
        return Err(LedgerError::SpreadsheetRequired);
    }
    let grid = load_grid(path)?;
    extract(&grid, opts)
}

pub fn extract(grid: &Grid, opts: &ExtractOptions) -> Result<(QuarterlyReport, ExtractionTrace)> {
    let layout = &opts.layout;
    if grid.len() < layout.min_rows {
        return Err(LedgerError::TooFewRows {
            found: grid.len(),
            required: layout.min_rows,
        });
    }
    if grid.len() <= layout.header_row {
        return Err(LedgerError::MissingHeaderRow(layout.header_row + 1));
    }

    let mut trace = ExtractionTrace {
        total_rows: grid.len(),
        header_row: grid.row(layout.header_row).to_vec(),
        sub_header_row: grid.row(layout.sub_header_row).to_vec(),
        ..Default::default()
    };

    let located = locate_departments(grid, layout, opts.strategy);
    let Some(strategy) = located.strategy else {
        return Err(LedgerError::NoDepartments(layout.header_row + 1));
    };
    trace.strategy = strategy.name().to_string();

    let mut report = QuarterlyReport {
        company_name: company_name(grid, layout).unwrap_or_default().to_string(),
        period: period(grid, layout).unwrap_or_default().to_string(),
        ..Default::default()
    };

    let mut data: Vec<DepartmentData> = located
        .departments
        .iter()
        .map(|d| DepartmentData {
            department: d.name.clone(),
            ..Default::default()
        })
        .collect();

    for row in layout.data_start_row..grid.len() {
        let Some(label) = line_label(grid, row) else {
            continue;
        };
        trace.rows_processed += 1;

        for (dept, out) in located.departments.iter().zip(data.iter_mut()) {
            let value = read_value(grid, row, dept, opts.value_mode);
            if value == 0.0 {
                continue;
            }
            if out.line_items.insert(label.to_string(), value).is_some() {
                trace.notes.push(format!(
                    "{}: line item '{label}' appears more than once; last value kept, all values counted in total",
                    dept.name
                ));
            }
            out.total += value;
            trace.values_found += 1;
            if trace.samples.len() < MAX_SAMPLES {
                trace.samples.push(format!("{} / {label}: {value}", dept.name));
            }
        }
    }

    for dept in data {
        let name = dept.department.clone();
        if report.departments.insert(name.clone(), dept).is_some() {
            tracing::debug!(department = %name, "department name repeated, later column wins");
            trace
                .notes
                .push(format!("department '{name}' appears more than once; later column kept"));
        }
    }

    report.summary = report
        .departments
        .iter()
        .map(|(name, d)| (name.clone(), d.total))
        .collect();

    let revenue: Vec<&DepartmentData> = report
        .departments
        .values()
        .filter(|d| d.department.to_lowercase().contains("revenue"))
        .collect();
    report.revenue_total = revenue.iter().fold(0.0, |acc, d| acc + d.total);
    if revenue.len() > 1 {
        let names: Vec<&str> = revenue.iter().map(|d| d.department.as_str()).collect();
        tracing::warn!(
            departments = ?names,
            "several departments mention revenue; revenue total adds them all"
        );
        trace.notes.push(format!(
            "revenueTotal sums {} departments: {}",
            names.len(),
            names.join(", ")
        ));
    }

    trace.departments = located.departments;
    tracing::info!(
        company = %report.company_name,
        period = %report.period,
        departments = report.departments.len(),
        values = trace.values_found,
        strategy = %trace.strategy,
        "quarterly report extracted"
    );
    Ok((report, trace))
}

fn first_cell_with<'a>(
    grid: &'a Grid,
    rows: impl Iterator<Item = usize>,
    cues: &[&str],
) -> Option<&'a str> {
    rows.flat_map(move |r| (0..grid.row(r).len()).map(move |c| grid.cell(r, c)))
        .find(|text| cues.iter().any(|cue| text.contains(cue)))
}

fn company_name<'a>(grid: &'a Grid, layout: &Layout) -> Option<&'a str> {
    first_cell_with(grid, 0..layout.company_rows.min(grid.len()), COMPANY_CUES)
}

fn period<'a>(grid: &'a Grid, layout: &Layout) -> Option<&'a str> {
    first_cell_with(grid, std::iter::once(layout.period_row), PERIOD_CUES)
}

/// First non-empty of the two leading cells, unless it is a section heading.
fn line_label(grid: &Grid, row: usize) -> Option<&str> {
    let label = [grid.cell(row, 0), grid.cell(row, 1)]
        .into_iter()
        .find(|c| !c.is_empty())?;
    (!label.contains(SKIP_LABEL)).then_some(label)
}

fn read_value(grid: &Grid, row: usize, dept: &DepartmentColumn, mode: ValueMode) -> f64 {
    let value_at = |col: usize| match grid.cell(row, col) {
        "" | "-" => 0.0,
        text => parse_amount_or_zero(text),
    };
    match mode {
        ValueMode::TotalColumn => value_at(dept.total_column),
        ValueMode::SpanSum => (dept.start_column..=dept.end_column).map(value_at).sum(),
    }
}
