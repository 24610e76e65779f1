//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that make a whole trace file unusable
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid trace format: {0}")]
    InvalidFormat(String),
}

/// Errors for a single trace record (the record is skipped)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field '{field}': {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("Unsupported phase: {0}")]
    UnsupportedPhase(String),
}

/// Errors loading a custom categorization rules file
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid rules JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Rules file contains no rules")]
    Empty,
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
