//! Error handling for carpark data loading and querying.
//!
//! Provides typed errors for unreadable sources, malformed CSV rows and
//! operations that need at least one record. Join misses are not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarparkError {
    #[error("Source unavailable: {source_name}")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cannot {operation}: no records")]
    EmptyInput { operation: String },

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Invalid value for '{column}' at line {line}: '{value}'")]
    InvalidField {
        line: usize,
        column: String,
        value: String,
    },

    #[error("No availability snapshot has been loaded")]
    SnapshotNotLoaded,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CarparkError {
    pub fn source_unavailable(source_name: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            source,
        }
    }

    pub fn empty_input(operation: impl Into<String>) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CarparkError>;
