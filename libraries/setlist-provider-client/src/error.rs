//! Error types for the provider gateway client.

use setlist_core::ProviderError;
use thiserror::Error;

/// Errors that can occur when talking to a provider gateway.
#[derive(Error, Debug)]
pub enum ProviderClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Gateway returned an error response
    #[error("Gateway error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Invalid gateway URL
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse gateway response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Gateway is offline or unreachable
    #[error("Gateway unreachable: {0}")]
    Unreachable(String),
}

/// Result type for gateway client operations.
pub type Result<T> = std::result::Result<T, ProviderClientError>;

impl From<ProviderClientError> for ProviderError {
    fn from(err: ProviderClientError) -> Self {
        match err {
            ProviderClientError::Status { status, message } => match status {
                401 | 403 => ProviderError::Auth(message),
                404 => ProviderError::NotFound(message),
                _ => ProviderError::api_status(status, message),
            },
            ProviderClientError::Unreachable(message) => ProviderError::Unreachable(message),
            ProviderClientError::Request(e) if e.is_connect() || e.is_timeout() => {
                ProviderError::Unreachable(e.to_string())
            }
            other => ProviderError::api(other.to_string()),
        }
    }
}
