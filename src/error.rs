//! Error types for georange
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using RangeError
pub type Result<T> = std::result::Result<T, RangeError>;

/// Unified error type for georange operations
#[derive(Debug, Error)]
pub enum RangeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    #[error("Malformed row at line {line}: expected 6 fields, got {fields}")]
    Parse { line: usize, fields: usize },

    #[error("Unterminated quoted field starting at line {line}")]
    UnterminatedQuote { line: usize },

    // -------------------------------------------------------------------------
    // Table Errors
    // -------------------------------------------------------------------------
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // -------------------------------------------------------------------------
    // Alert Generation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RangeError {
    /// True for errors raised while parsing file content
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            RangeError::Parse { .. } | RangeError::UnterminatedQuote { .. }
        )
    }
}
