use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("Workbook error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Workbook error: {0}")]
    WorkbookRead(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("Unknown range: {0} (expected day, month, year or all)")]
    UnknownRange(String),

    #[error("Invalid filter '{0}' (expected field=value)")]
    InvalidFilter(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
