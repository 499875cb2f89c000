//! Error types for search orchestration.

use investiga_core::ConfigError;
use investiga_providers::ProviderError;
use thiserror::Error;

/// Errors that can occur while running a search.
///
/// Vendor failures are not errors at this level: they arrive as sentinel
/// items inside the results.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search was cancelled by its caller or superseded by a newer one
    #[error("search cancelled")]
    Cancelled,

    /// No subject field carries a value
    #[error("subject has no fields to search")]
    EmptySubject,

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider setup failed (HTTP client construction)
    #[error("provider setup failed: {0}")]
    Providers(#[from] ProviderError),
}

impl SearchError {
    /// Whether the caller should drop this error silently.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_silent() {
        assert!(SearchError::Cancelled.is_cancelled());
        assert!(!SearchError::EmptySubject.is_cancelled());
        assert_eq!(SearchError::Cancelled.to_string(), "search cancelled");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: SearchError = ConfigError::InvalidValue {
            field: "search.timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
