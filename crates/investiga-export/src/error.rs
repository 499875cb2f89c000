//! Error types for exports.

use thiserror::Error;

/// Errors that can occur while rendering an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Unknown export format name
    #[error("unknown export format: '{0}' (expected json, csv or markdown)")]
    UnknownFormat(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Formatting error while writing text
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
