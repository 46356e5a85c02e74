use std::path::Path;

use crate::error::{LedgerError, Result};

/// A merged cell block, 0-indexed and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRange {
    pub first_row: usize,
    pub first_col: usize,
    pub last_row: usize,
    pub last_col: usize,
}

/// The first sheet of an export as rows of text cells, plus whatever merged
/// ranges the container format exposes.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    merges: Vec<MergedRange>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            merges: Vec::new(),
        }
    }

    pub fn with_merges(mut self, merges: Vec<MergedRange>) -> Self {
        self.merges = merges;
        self
    }

    pub fn merges(&self) -> &[MergedRange] {
        &self.merges
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns in the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> &[String] {
        self.rows.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Trimmed cell text; missing cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.row(row).get(col).map(|c| c.trim()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Spreadsheet,
}

pub fn file_kind(path: &Path) -> Result<FileKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => Ok(FileKind::Csv),
        "xlsx" | "xls" => Ok(FileKind::Spreadsheet),
        _ => Err(LedgerError::UnsupportedFileType(if ext.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{ext}")
        })),
    }
}

/// Read the whole file into memory and decode its first sheet.
pub fn load_grid(path: &Path) -> Result<Grid> {
    let kind = file_kind(path)?;
    let data = std::fs::read(path)?;
    let grid = match kind {
        FileKind::Csv => grid_from_csv(&data)?,
        FileKind::Spreadsheet => grid_from_spreadsheet(data)?,
    };
    tracing::debug!(
        path = %path.display(),
        rows = grid.len(),
        merges = grid.merges().len(),
        "loaded grid"
    );
    Ok(grid)
}

pub fn grid_from_csv(data: &[u8]) -> Result<Grid> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.trim().to_string()).collect());
    }
    Ok(Grid::new(rows))
}

#[cfg(feature = "xlsx")]
pub fn grid_from_spreadsheet(data: Vec<u8>) -> Result<Grid> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto_from_rs(std::io::Cursor::new(data))
        .map_err(|e| LedgerError::Spreadsheet(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| LedgerError::EmptyInput("workbook (no sheets found)".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| LedgerError::Spreadsheet(e.to_string()))?;

    // calamine trims leading empty rows/columns; pad them back so indices
    // match what a user sees in the sheet.
    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<String>> = vec![Vec::new(); row0 as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); col0 as usize];
        cells.extend(row.iter().map(cell_text));
        rows.push(cells);
    }

    let merges = merged_ranges(&mut workbook, &sheet);
    Ok(Grid::new(rows).with_merges(merges))
}

#[cfg(not(feature = "xlsx"))]
pub fn grid_from_spreadsheet(_data: Vec<u8>) -> Result<Grid> {
    Err(LedgerError::UnsupportedFileType(
        "spreadsheet (built without xlsx support)".to_string(),
    ))
}

#[cfg(feature = "xlsx")]
fn merged_ranges<RS: std::io::Read + std::io::Seek>(
    workbook: &mut calamine::Sheets<RS>,
    sheet: &str,
) -> Vec<MergedRange> {
    match workbook {
        calamine::Sheets::Xlsx(xlsx) => {
            if let Err(e) = xlsx.load_merged_regions() {
                tracing::warn!("failed to read merged cells, continuing without: {e}");
                return Vec::new();
            }
            xlsx.merged_regions_by_sheet(sheet)
                .into_iter()
                .map(|(_, _, dims)| MergedRange {
                    first_row: dims.start.0 as usize,
                    first_col: dims.start.1 as usize,
                    last_row: dims.end.0 as usize,
                    last_col: dims.end.1 as usize,
                })
                .collect()
        }
        // Only xlsx exposes merge metadata; other formats use the header scan.
        _ => Vec::new(),
    }
}

#[cfg(feature = "xlsx")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// Excel stores dates as days since 1899-12-30 (the 1900 leap year bug
/// shifts the epoch back a day).
pub fn excel_serial_to_date(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = base.checked_add_days(chrono::Days::new(serial as u64))?;
    Some(date.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
pub(crate) fn grid_of(rows: &[&[&str]]) -> Grid {
    Grid::new(
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}
