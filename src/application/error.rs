use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{DateRangeError, RecordError};
use crate::storage::StorageError;

/// Failures reported back to whoever issued the request.
/// None of them are fatal, and the ledger is left unchanged on all of them.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid date range: {0}")]
    DateRange(#[from] DateRangeError),

    #[error("No data file found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed data file at line {line}: invalid {field}: {message}")]
    Parse {
        line: u64,
        field: &'static str,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => AppError::FileNotFound(path),
            StorageError::Parse {
                line,
                field,
                message,
            } => AppError::Parse {
                line,
                field,
                message,
            },
            other => AppError::Storage(other),
        }
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        AppError::Validation(err.to_string())
    }
}
