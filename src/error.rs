//! Error types for CheckMyGrade
//!
//! Provides a unified error type for all table operations.
//!
//! A missing key is not an error anywhere in the crate: lookups return
//! `Option` and mutations report whether anything matched.

use thiserror::Error;

/// Result type alias using GradeError
pub type Result<T> = std::result::Result<T, GradeError>;

/// Unified error type for CheckMyGrade operations
#[derive(Debug, Error)]
pub enum GradeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed row {row} in table '{table}': expected {expected} fields, found {found}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },

    // -------------------------------------------------------------------------
    // Credential Errors
    // -------------------------------------------------------------------------
    #[error("Credential error: {0}")]
    Credential(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
