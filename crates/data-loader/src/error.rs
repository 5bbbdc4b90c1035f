//! Error types for the data-loader crate.
//!
//! Loading can fail on I/O, on malformed JSON, or on a catalog that breaks
//! one of the dataset invariants checked by [`crate::Dataset::validate`].

use thiserror::Error;

/// Errors that can occur while loading the paper catalog and feedback table
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents could not be decoded
    ///
    /// `reason` carries serde_json's message, which includes line and column.
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two catalog entries share an identifier
    #[error("Duplicate paper id: {id}")]
    DuplicateId { id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
