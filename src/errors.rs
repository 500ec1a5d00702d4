// errors.rs
use crate::domain::ExtractionError;
use crate::scraper::FetchError;
use std::fmt;

/// Errors that abort the current command: configuration, fetching,
/// extraction, and sink failures. Enrichment failures never reach this
/// type; they degrade individual fields instead (see `enrich`).
#[derive(Debug)]
pub enum AppError {
    Config(String),
    Fetch(FetchError),
    Extraction(ExtractionError),
    Db(String),
    Xlsx(String),
    Io(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration error: {msg}"),
            AppError::Fetch(err) => write!(f, "Fetch error: {err}"),
            AppError::Extraction(err) => write!(f, "Extraction error: {err}"),
            AppError::Db(msg) => write!(f, "Database error: {msg}"),
            AppError::Xlsx(msg) => write!(f, "Spreadsheet error: {msg}"),
            AppError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Fetch(err)
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Extraction(err)
    }
}
