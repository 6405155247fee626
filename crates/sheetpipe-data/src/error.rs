//! Error types for worksheet conversion.

use std::io;

use thiserror::Error;

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while selecting, reading or emitting a worksheet
#[derive(Debug, Error)]
pub enum DataError {
    /// Conflicting or invalid settings (both sheet selectors, unknown format, ...)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Input is not a readable workbook
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    /// Sheet not found in workbook
    #[error("Sheet '{sheet}' not found. Available sheets: {available}")]
    SheetNotFound { sheet: String, available: String },

    /// Workbook has no sheet that could be selected
    #[error("No sheet found")]
    NoWorksheet,

    /// IO error while reading input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// IO error while writing output
    #[error("Failed to write output: {0}")]
    Write(#[source] io::Error),

    /// Encoder failure for one of the output formats
    #[error("Failed to encode {format} output: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    /// Calamine error
    #[error("Excel error: {0}")]
    Calamine(String),
}

impl DataError {
    /// True when the output consumer closed its end of the pipe.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, DataError::Write(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

impl From<calamine::XlsxError> for DataError {
    fn from(err: calamine::XlsxError) -> Self {
        DataError::Calamine(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => DataError::Write(e),
            other => DataError::Encode {
                format: "csv",
                message: format!("{:?}", other),
            },
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Encode {
            format: "json",
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for DataError {
    fn from(err: serde_yaml::Error) -> Self {
        DataError::Encode {
            format: "yaml",
            message: err.to_string(),
        }
    }
}
