use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Unsupported file type '{0}'. Please provide a CSV or Excel file.")]
    UnsupportedFileType(String),

    #[error("Quarterly income statements must be in Excel format (.xlsx or .xls)")]
    SpreadsheetRequired,

    #[error("No data found in {0}")]
    EmptyInput(String),

    #[error("File does not have enough rows (found {found}, expected at least {required})")]
    TooFewRows { found: usize, required: usize },

    #[error("Row {0} (department headers) not found")]
    MissingHeaderRow(usize),

    #[error("No department headers recognized in row {0}")]
    NoDepartments(usize),

    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
