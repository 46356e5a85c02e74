use std::collections::HashMap;
use std::path::Path;

use crate::amount::parse_amount;
use crate::error::{LedgerError, Result};
use crate::grid::{load_grid, Grid};
use crate::models::Transaction;

// ---------------------------------------------------------------------------
// Column synonyms, tried in order
// ---------------------------------------------------------------------------

const DATE: &[&str] = &["date", "transaction date"];
const TYPE: &[&str] = &["type", "transaction type"];
const DOC_NUMBER: &[&str] = &["document number", "doc number", "number"];
const NAME: &[&str] = &["name", "vendor", "employee", "customer"];
const ACCOUNT: &[&str] = &["account", "account name"];
const DEPARTMENT: &[&str] = &["department", "dept"];
const CLASS: &[&str] = &["class", "classification"];
const AMOUNT: &[&str] = &["amount", "debit", "credit"];
const MEMO: &[&str] = &["memo", "description"];

/// Header lookup for a transaction-detail export.
struct ColumnMap {
    index: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        // A repeated header name points at its last occurrence.
        let index = header
            .iter()
            .enumerate()
            .map(|(i, col)| (col.trim().to_lowercase(), i))
            .collect();
        Self { index }
    }

    /// Value of the first synonym present in the header and within `record`.
    fn get<'a>(&self, record: &'a [String], names: &[&str]) -> &'a str {
        names
            .iter()
            .filter_map(|name| self.index.get(*name))
            .find(|&&idx| idx < record.len())
            .map(|&idx| record[idx].trim())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportSummary {
    pub rows: usize,
    /// Rows whose amount could not be parsed; they were kept with amount 0.
    pub bad_amounts: usize,
}

pub fn load_transactions(path: &Path) -> Result<(Vec<Transaction>, ImportSummary)> {
    let grid = load_grid(path)?;
    transactions_from_grid(&grid)
}

/// The first row is the header; every non-blank row after it becomes a
/// transaction.
pub fn transactions_from_grid(grid: &Grid) -> Result<(Vec<Transaction>, ImportSummary)> {
    if grid.is_empty() {
        return Err(LedgerError::EmptyInput("transaction export".to_string()));
    }
    let columns = ColumnMap::from_header(grid.row(0));

    let mut transactions = Vec::new();
    let mut summary = ImportSummary::default();
    for (idx, record) in grid.rows().iter().enumerate().skip(1) {
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let raw_amount = columns.get(record, AMOUNT);
        let amount = match parse_amount(raw_amount) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(row = idx + 1, "{e}; using 0");
                summary.bad_amounts += 1;
                0.0
            }
        };
        transactions.push(Transaction {
            date: columns.get(record, DATE).to_string(),
            txn_type: columns.get(record, TYPE).to_string(),
            doc_number: columns.get(record, DOC_NUMBER).to_string(),
            name: columns.get(record, NAME).to_string(),
            account: columns.get(record, ACCOUNT).to_string(),
            department: columns.get(record, DEPARTMENT).to_string(),
            class: columns.get(record, CLASS).to_string(),
            amount,
            memo: columns.get(record, MEMO).to_string(),
        });
    }
    summary.rows = transactions.len();
    tracing::info!(rows = summary.rows, bad_amounts = summary.bad_amounts, "transactions imported");
    Ok((transactions, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid_of;

    #[test]
    fn test_netsuite_style_header() {
        let grid = grid_of(&[
            &["Date", "Type", "Document Number", "Name", "Account", "Department", "Class", "Amount", "Memo"],
            &["2024-01-15", "Journal", "JE-2024-001", "Acme Corp", "4000 - Revenue", "Sales", "Product A", "100000.00", "Monthly recurring revenue"],
        ]);
        let (txns, summary) = transactions_from_grid(&grid).unwrap();
        assert_eq!(summary, ImportSummary { rows: 1, bad_amounts: 0 });
        let t = &txns[0];
        assert_eq!(t.date, "2024-01-15");
        assert_eq!(t.txn_type, "Journal");
        assert_eq!(t.doc_number, "JE-2024-001");
        assert_eq!(t.name, "Acme Corp");
        assert_eq!(t.account, "4000 - Revenue");
        assert_eq!(t.department, "Sales");
        assert_eq!(t.class, "Product A");
        assert_eq!(t.amount, 100000.0);
        assert_eq!(t.memo, "Monthly recurring revenue");
    }

    #[test]
    fn test_synonyms_are_case_insensitive() {
        let grid = grid_of(&[
            &[" TRANSACTION DATE ", "Vendor", "Account Name", "Dept", "Debit", "Description"],
            &["01/02/2024", "AWS", "Hosting", "Engineering", "$1,200.00", "cloud"],
        ]);
        let (txns, _) = transactions_from_grid(&grid).unwrap();
        let t = &txns[0];
        assert_eq!(t.date, "01/02/2024");
        assert_eq!(t.name, "AWS");
        assert_eq!(t.account, "Hosting");
        assert_eq!(t.department, "Engineering");
        assert_eq!(t.amount, 1200.0);
        assert_eq!(t.memo, "cloud");
        assert_eq!(t.class, "");
        assert_eq!(t.doc_number, "");
    }

    #[test]
    fn test_amount_column_preferred_over_debit() {
        let grid = grid_of(&[
            &["Account", "Debit", "Amount"],
            &["Rent", "10", "(25.00)"],
        ]);
        let (txns, _) = transactions_from_grid(&grid).unwrap();
        assert_eq!(txns[0].amount, -25.0);
    }

    #[test]
    fn test_short_row_falls_through_to_next_synonym() {
        let grid = grid_of(&[
            &["Account", "Debit", "Memo", "Amount"],
            &["Rent", "40"],
        ]);
        let (txns, _) = transactions_from_grid(&grid).unwrap();
        assert_eq!(txns[0].amount, 40.0);
        assert_eq!(txns[0].memo, "");
    }

    #[test]
    fn test_bad_amount_kept_as_zero() {
        let grid = grid_of(&[
            &["Account", "Amount"],
            &["Sales Revenue", "1,000"],
            &["Sales Revenue", "n/a"],
        ]);
        let (txns, summary) = transactions_from_grid(&grid).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[1].amount, 0.0);
        assert_eq!(summary.bad_amounts, 1);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let grid = grid_of(&[
            &["Account", "Amount"],
            &["", ""],
            &[],
            &["Rent", "5"],
        ]);
        let (txns, summary) = transactions_from_grid(&grid).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(summary.rows, 1);
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let err = transactions_from_grid(&Grid::default()).unwrap_err();
        assert!(matches!(err, LedgerError::EmptyInput(_)));
    }

    #[test]
    fn test_load_transactions_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detail.csv");
        std::fs::write(
            &path,
            "Account,Department,Amount\nSales Revenue,,\"1,000.00\"\nCOGS - Hosting,Infrastructure,200\n",
        )
        .unwrap();
        let (txns, _) = load_transactions(&path).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].amount, 1000.0);
        assert_eq!(txns[1].department, "Infrastructure");
    }
}
