//! Finds the department groups of an income statement and, for each one,
//! the column holding its total.
//!
//! Two layers of ordered fallbacks:
//!
//! * [`LocatorStrategy`] decides how departments are found for the whole
//!   sheet (merged header cells, else a scan of the header row);
//! * [`ColumnRule`] picks the total column inside one department's span when
//!   scanning.
//!
//! Each link returns `None`/empty when it has nothing confident to say, and
//! the next one is tried.

use serde::{Deserialize, Serialize};

use crate::categorizer::is_main_department;
use crate::grid::Grid;
use crate::models::DepartmentColumn;
use crate::settings::Layout;

/// Which sheet-level strategies to try.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum StrategyChoice {
    /// Merged headers first, then the header scan.
    #[default]
    Auto,
    /// Merged headers only.
    Merge,
    /// Header scan only.
    Scan,
}

impl StrategyChoice {
    pub fn chain(&self) -> &'static [LocatorStrategy] {
        match self {
            Self::Auto => &[LocatorStrategy::MergedHeaders, LocatorStrategy::HeaderScan],
            Self::Merge => &[LocatorStrategy::MergedHeaders],
            Self::Scan => &[LocatorStrategy::HeaderScan],
        }
    }
}

// ---------------------------------------------------------------------------
// Sheet-level strategies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorStrategy {
    MergedHeaders,
    HeaderScan,
}

impl LocatorStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MergedHeaders => "merged-headers",
            Self::HeaderScan => "header-scan",
        }
    }

    pub fn locate(&self, grid: &Grid, layout: &Layout) -> Vec<DepartmentColumn> {
        match self {
            Self::MergedHeaders => merged_headers(grid, layout),
            Self::HeaderScan => header_scan(grid, layout),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    /// `None` when no strategy recognized a department.
    pub strategy: Option<LocatorStrategy>,
    pub departments: Vec<DepartmentColumn>,
}

pub fn locate_departments(grid: &Grid, layout: &Layout, choice: StrategyChoice) -> Located {
    for strategy in choice.chain() {
        let departments = strategy.locate(grid, layout);
        if !departments.is_empty() {
            for d in &departments {
                tracing::debug!(
                    strategy = strategy.name(),
                    department = %d.name,
                    span = ?(d.start_column, d.end_column),
                    total_column = d.total_column,
                    rule = d.rule,
                    "department located"
                );
            }
            return Located {
                strategy: Some(*strategy),
                departments,
            };
        }
        tracing::debug!(strategy = strategy.name(), "no departments found");
    }
    Located {
        strategy: None,
        departments: Vec::new(),
    }
}

/// Departments named by merged cells lying entirely in the header row. The
/// merge's rightmost column is the total column.
fn merged_headers(grid: &Grid, layout: &Layout) -> Vec<DepartmentColumn> {
    let row = layout.header_row;
    let mut merges: Vec<_> = grid
        .merges()
        .iter()
        .filter(|m| m.first_row == row && m.last_row == row)
        .collect();
    merges.sort_by_key(|m| m.first_col);

    merges
        .into_iter()
        .filter_map(|m| {
            let name = grid.cell(row, m.first_col);
            is_main_department(name).then(|| DepartmentColumn {
                name: name.to_string(),
                start_column: m.first_col,
                end_column: m.last_col,
                total_column: m.last_col,
                rule: "merge-right-edge",
            })
        })
        .collect()
}

/// Departments named by plain header cells. Each runs until the next
/// recognized header or the sheet's last column.
fn header_scan(grid: &Grid, layout: &Layout) -> Vec<DepartmentColumn> {
    let row = layout.header_row;
    let width = grid.width();
    let starts: Vec<(usize, &str)> = (layout.label_columns..width)
        .map(|col| (col, grid.cell(row, col)))
        .filter(|(_, text)| is_main_department(text))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &(start, name))| {
            let end = starts.get(i + 1).map_or(width - 1, |&(next, _)| next - 1);
            let span = Span { start, end };
            let (total_column, rule) = choose_total_column(grid, span, layout);
            DepartmentColumn {
                name: name.to_string(),
                start_column: start,
                end_column: end,
                total_column,
                rule: rule.name(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Column rules within one department span
// ---------------------------------------------------------------------------

/// Inclusive column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Rightmost column satisfying `pred`.
    fn rightmost(&self, pred: impl Fn(usize) -> bool) -> Option<usize> {
        (self.start..=self.end).rev().find(|&col| pred(col))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    SubHeaderTotal,
    SubHeaderAmount,
    NextRowLabel,
    RightmostData,
    StartColumn,
}

pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule::SubHeaderTotal,
    ColumnRule::SubHeaderAmount,
    ColumnRule::NextRowLabel,
    ColumnRule::RightmostData,
    ColumnRule::StartColumn,
];

fn is_total_label(text: &str) -> bool {
    text.to_lowercase().starts_with("total")
}

fn is_amount_label(text: &str) -> bool {
    text.to_lowercase() == "amount"
}

impl ColumnRule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubHeaderTotal => "sub-header-total",
            Self::SubHeaderAmount => "sub-header-amount",
            Self::NextRowLabel => "next-row-label",
            Self::RightmostData => "rightmost-data",
            Self::StartColumn => "start-column",
        }
    }

    pub fn locate(&self, grid: &Grid, span: Span, layout: &Layout) -> Option<usize> {
        let sub = layout.sub_header_row;
        match self {
            Self::SubHeaderTotal => span.rightmost(|c| is_total_label(grid.cell(sub, c))),
            Self::SubHeaderAmount => span.rightmost(|c| is_amount_label(grid.cell(sub, c))),
            Self::NextRowLabel => span.rightmost(|c| {
                let text = grid.cell(sub + 1, c);
                is_total_label(text) || is_amount_label(text)
            }),
            Self::RightmostData => {
                let first = layout.data_start_row;
                let last = (first + layout.data_window).min(grid.len());
                span.rightmost(|c| {
                    (first..last).any(|r| {
                        let v = grid.cell(r, c);
                        !v.is_empty() && v != "-"
                    })
                })
            }
            Self::StartColumn => Some(span.start),
        }
    }
}

pub fn choose_total_column(grid: &Grid, span: Span, layout: &Layout) -> (usize, ColumnRule) {
    COLUMN_RULES
        .iter()
        .find_map(|rule| rule.locate(grid, span, layout).map(|col| (col, *rule)))
        .unwrap_or((span.start, ColumnRule::StartColumn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MergedRange;

    /// Rows 0-5 blank, then header (6), sub-header (7), the row below it (8)
    /// and data from 9.
    fn sheet(header: &[&str], sub: &[&str], next: &[&str], data: &[&[&str]]) -> Grid {
        let to_row = |r: &[&str]| r.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); 6];
        rows.push(to_row(header));
        rows.push(to_row(sub));
        rows.push(to_row(next));
        rows.extend(data.iter().map(|r| to_row(r)));
        Grid::new(rows)
    }

    fn layout() -> Layout {
        Layout::default()
    }

    #[test]
    fn test_merged_header_uses_right_edge() {
        // "G&A" merged across C-F in row 7, values only in F.
        let grid = sheet(
            &["", "", "G&A", "", "", ""],
            &[],
            &[],
            &[&["Rent", "", "", "", "", "1,000"], &["Legal", "", "", "", "", "500"]],
        )
        .with_merges(vec![MergedRange {
            first_row: 6,
            first_col: 2,
            last_row: 6,
            last_col: 5,
        }]);
        let located = locate_departments(&grid, &layout(), StrategyChoice::Auto);
        assert_eq!(located.strategy, Some(LocatorStrategy::MergedHeaders));
        assert_eq!(located.departments.len(), 1);
        let d = &located.departments[0];
        assert_eq!(d.name, "G&A");
        assert_eq!(d.total_column, 5);
        assert_eq!((d.start_column, d.end_column), (2, 5));
    }

    #[test]
    fn test_merges_outside_header_row_are_ignored() {
        let grid = sheet(&["", "", "Revenue", ""], &[], &[], &[&["Sales", "", "", "10"]])
            .with_merges(vec![
                // Spans two rows.
                MergedRange { first_row: 6, first_col: 2, last_row: 7, last_col: 3 },
                // Title merge above the header.
                MergedRange { first_row: 0, first_col: 0, last_row: 0, last_col: 3 },
            ]);
        assert!(LocatorStrategy::MergedHeaders.locate(&grid, &layout()).is_empty());
        let located = locate_departments(&grid, &layout(), StrategyChoice::Auto);
        assert_eq!(located.strategy, Some(LocatorStrategy::HeaderScan));
        assert_eq!(located.departments[0].total_column, 3);
    }

    #[test]
    fn test_merged_headers_skip_unrecognized_and_sort_by_column() {
        let grid = sheet(&["", "", "Marketing", "", "Notes", "", "Revenue", ""], &[], &[], &[])
            .with_merges(vec![
                MergedRange { first_row: 6, first_col: 6, last_row: 6, last_col: 7 },
                MergedRange { first_row: 6, first_col: 4, last_row: 6, last_col: 5 },
                MergedRange { first_row: 6, first_col: 2, last_row: 6, last_col: 3 },
            ]);
        let found = LocatorStrategy::MergedHeaders.locate(&grid, &layout());
        let names: Vec<_> = found.iter().map(|d| (d.name.as_str(), d.total_column)).collect();
        assert_eq!(names, vec![("Marketing", 3), ("Revenue", 7)]);
    }

    #[test]
    fn test_scan_spans_end_before_next_department() {
        let grid = sheet(
            &["Account", "", "Revenue", "", "", "Marketing", "", "Notes"],
            &[],
            &[],
            &[],
        );
        let found = LocatorStrategy::HeaderScan.locate(&grid, &layout());
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].start_column, found[0].end_column), (2, 4));
        assert_eq!((found[1].start_column, found[1].end_column), (5, 7));
    }

    #[test]
    fn test_scan_skips_label_columns() {
        let grid = sheet(&["Revenue", "Sales", "", "R&D"], &[], &[], &[]);
        let found = LocatorStrategy::HeaderScan.locate(&grid, &layout());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "R&D");
    }

    #[test]
    fn test_rule_sub_header_total_prefers_rightmost() {
        let grid = sheet(
            &["", "", "Revenue", "", "", ""],
            &["", "", "Total Jan", "Amount", "Total", ""],
            &[],
            &[],
        );
        let span = Span { start: 2, end: 5 };
        assert_eq!(ColumnRule::SubHeaderTotal.locate(&grid, span, &layout()), Some(4));
        assert_eq!(
            choose_total_column(&grid, span, &layout()),
            (4, ColumnRule::SubHeaderTotal)
        );
    }

    #[test]
    fn test_rule_sub_header_amount() {
        let grid = sheet(
            &["", "", "Revenue", "", "", ""],
            &["", "", "Amount", "%", "amount", "%"],
            &[],
            &[],
        );
        let span = Span { start: 2, end: 5 };
        assert_eq!(ColumnRule::SubHeaderTotal.locate(&grid, span, &layout()), None);
        assert_eq!(
            choose_total_column(&grid, span, &layout()),
            (4, ColumnRule::SubHeaderAmount)
        );
    }

    #[test]
    fn test_rule_next_row_label() {
        let grid = sheet(
            &["", "", "R&D", "", ""],
            &["", "", "Jan", "Feb", "Mar"],
            &["", "", "Amount", "TOTAL", ""],
            &[],
        );
        let span = Span { start: 2, end: 4 };
        assert_eq!(
            choose_total_column(&grid, span, &layout()),
            (3, ColumnRule::NextRowLabel)
        );
    }

    #[test]
    fn test_rule_rightmost_data_ignores_placeholders() {
        let grid = sheet(
            &["", "", "Marketing", "", "", ""],
            &[],
            &[],
            &[
                &["Ads", "", "10", "20", "-", ""],
                &["Events", "", "5", "", "", " "],
            ],
        );
        let span = Span { start: 2, end: 5 };
        assert_eq!(
            choose_total_column(&grid, span, &layout()),
            (3, ColumnRule::RightmostData)
        );
    }

    #[test]
    fn test_rule_rightmost_data_only_looks_at_window() {
        let early: &[&str] = &["x", "", "1", ""];
        let mut data = vec![early; 6];
        data.push(&["late", "", "", "99"]);
        let grid = sheet(&["", "", "COGS", ""], &[], &[], &data);
        let span = Span { start: 2, end: 3 };
        assert_eq!(ColumnRule::RightmostData.locate(&grid, span, &layout()), Some(2));
    }

    #[test]
    fn test_rule_falls_back_to_start_column() {
        let grid = sheet(&["", "", "G&A", ""], &[], &[], &[]);
        let span = Span { start: 2, end: 3 };
        assert_eq!(
            choose_total_column(&grid, span, &layout()),
            (2, ColumnRule::StartColumn)
        );
    }

    #[test]
    fn test_forced_strategies() {
        let grid = sheet(&["", "", "G&A", "", "Revenue"], &[], &[], &[])
            .with_merges(vec![MergedRange { first_row: 6, first_col: 2, last_row: 6, last_col: 3 }]);
        let merge = locate_departments(&grid, &layout(), StrategyChoice::Merge);
        assert_eq!(merge.departments.len(), 1);
        let scan = locate_departments(&grid, &layout(), StrategyChoice::Scan);
        assert_eq!(scan.strategy, Some(LocatorStrategy::HeaderScan));
        assert_eq!(scan.departments.len(), 2);
    }

    #[test]
    fn test_nothing_found() {
        let grid = sheet(&["Account", "", "Jan", "Feb"], &[], &[], &[]);
        let located = locate_departments(&grid, &layout(), StrategyChoice::Auto);
        assert_eq!(located.strategy, None);
        assert!(located.departments.is_empty());
    }

    #[test]
    fn test_duplicate_names_are_kept_in_order() {
        let grid = sheet(&["", "", "Revenue", "", "Revenue", ""], &[], &[], &[]);
        let found = LocatorStrategy::HeaderScan.locate(&grid, &layout());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, found[1].name);
        assert_eq!(found[1].start_column, 4);
    }
}
