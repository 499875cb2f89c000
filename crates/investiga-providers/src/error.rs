//! Error types for lookup providers.
//!
//! These never reach the operator directly: the registry turns every
//! provider error into a sentinel item (see [`ProviderError::sentinel_message`]).

use investiga_core::Provider;
use thiserror::Error;

/// Errors that can occur while querying a provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Credentials or endpoint missing from configuration
    #[error("{provider} is not configured: missing {missing}")]
    NotConfigured {
        /// Provider
        provider: Provider,
        /// What is missing (`api key`, `base url`)
        missing: &'static str,
    },

    /// Vendor answered with a non-success status
    #[error("HTTP error ({provider}): status {status}")]
    Http {
        /// Provider
        provider: Provider,
        /// HTTP status code
        status: u16,
    },

    /// Vendor answered with something that is not the expected JSON
    #[error("failed to parse response from {provider}: {message}")]
    Parse {
        /// Provider
        provider: Provider,
        /// Error message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Operator-facing message carried by the sentinel item.
    #[must_use]
    pub fn sentinel_message(&self, provider: Provider) -> String {
        let name = match provider {
            Provider::EmailHibp => "HIBP",
            other => other.display_name(),
        };
        match self {
            Self::NotConfigured { .. } => format!("{name} não configurado"),
            Self::Http { status, .. } => format!("{name} HTTP {status}"),
            other => format!("{name} falhou: {other}"),
        }
    }
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::Http {
            provider: Provider::DirectData,
            status: 503,
        };
        assert_eq!(err.to_string(), "HTTP error (directdata): status 503");

        let err = ProviderError::NotConfigured {
            provider: Provider::EmailHibp,
            missing: "api key",
        };
        assert_eq!(
            err.to_string(),
            "email_hibp is not configured: missing api key"
        );
    }

    #[test]
    fn test_sentinel_messages() {
        let err = ProviderError::NotConfigured {
            provider: Provider::DirectData,
            missing: "base url",
        };
        assert_eq!(
            err.sentinel_message(Provider::DirectData),
            "Direct Data não configurado"
        );

        let err = ProviderError::Http {
            provider: Provider::DirectData,
            status: 500,
        };
        assert_eq!(
            err.sentinel_message(Provider::DirectData),
            "Direct Data HTTP 500"
        );

        let err = ProviderError::Parse {
            provider: Provider::Github,
            message: "expected object".to_string(),
        };
        assert!(err
            .sentinel_message(Provider::Github)
            .starts_with("GitHub falhou: failed to parse response"));
    }
}
