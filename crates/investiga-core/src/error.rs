//! Core error types for Investiga.
//!
//! Subsystem crates define their own error enums; this one covers the
//! foundation (configuration, provider and field names) and is what they
//! convert into when crossing crate boundaries.

use thiserror::Error;

/// Central error type for core operations.
#[derive(Error, Debug)]
pub enum InvestigaError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Unknown provider or subject field name
    #[error("unknown {kind}: '{value}'")]
    Unknown {
        /// What was being parsed (`provider`, `field`)
        kind: &'static str,
        /// The offending value
        value: String,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `InvestigaError`.
pub type Result<T> = std::result::Result<T, InvestigaError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InvestigaError::Unknown {
            kind: "provider",
            value: "altavista".to_string(),
        };
        assert_eq!(err.to_string(), "unknown provider: 'altavista'");

        let err = ConfigError::InvalidValue {
            field: "search.timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for search.timeout_secs: must be greater than zero"
        );
    }

    #[test]
    fn test_error_from_config() {
        let err: InvestigaError = ConfigError::NoConfigDir.into();
        assert!(matches!(err, InvestigaError::Config(_)));
    }
}
