//! Error types for the sheetscan library.
//!
//! The inference core never fails; these errors come from reading samples
//! and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sheetscan operations.
#[derive(Debug, Error)]
pub enum SheetscanError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no rows to sample.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for sheetscan operations.
pub type Result<T> = std::result::Result<T, SheetscanError>;
