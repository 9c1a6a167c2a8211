/// Error types for the transfer engine and its provider boundary
use thiserror::Error;

/// Result type alias using `TransferError`
pub type Result<T> = std::result::Result<T, TransferError>;

/// Result type alias using `ProviderError`
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Fatal transfer failures.
///
/// Every variant aborts an operation before any mutation takes place, except
/// that a destination created by an execute call is never rolled back.
/// Per-track failures during execute are not errors at this level; they are
/// reported in `TransferResult::failed_items`.
#[derive(Error, Debug)]
pub enum TransferError {
    /// Malformed, unsupported or ineligible playlist link or reference
    #[error("Invalid playlist reference: {0}")]
    InvalidReference(String),

    /// Selection criteria that cannot match anything meaningful
    #[error("Invalid selection criteria: {0}")]
    InvalidCriteria(String),

    /// Malformed request parameters (paging bounds, empty titles)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller may not manage the source or destination
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Creating the destination playlist failed; no tracks were attempted
    #[error("Failed to create destination playlist: {0}")]
    DestinationCreate(String),

    /// Source playlist cannot be read
    #[error("Source playlist unavailable: {0}")]
    SourceUnavailable(String),

    /// Existing destination playlist cannot be read
    #[error("Destination playlist unavailable: {0}")]
    DestinationUnavailable(String),

    /// The playlist a caller is acting from does not exist
    #[error("Playlist not found: {0}")]
    NotFound(String),

    /// Provider request failed outside of a transfer (browsing, search, link resolution)
    #[error("Provider request failed: {0}")]
    Provider(String),

    /// Internal playlist store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TransferError {
    /// Create an invalid reference error
    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    /// Create an invalid criteria error
    pub fn invalid_criteria(msg: impl Into<String>) -> Self {
        Self::InvalidCriteria(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Stable machine-readable code, used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidReference(_) => "invalid_reference",
            Self::InvalidCriteria(_) => "invalid_criteria",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Unauthorized(_) => "unauthorized",
            Self::DestinationCreate(_) => "destination_create",
            Self::SourceUnavailable(_) => "source_unavailable",
            Self::DestinationUnavailable(_) => "destination_unavailable",
            Self::NotFound(_) => "not_found",
            Self::Provider(_) => "provider",
            Self::Storage(_) => "storage",
        }
    }
}

/// Errors reported by a `MusicProvider` implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Provider authorization is missing, expired or insufficient
    #[error("Provider authorization failed: {0}")]
    Auth(String),

    /// The requested playlist or track does not exist at the provider
    #[error("Not found at provider: {0}")]
    NotFound(String),

    /// Any other provider-side failure
    #[error("Provider API error{}: {message}", status_suffix(.status))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// Transport-level failure reaching the provider
    #[error("Provider unreachable: {0}")]
    Unreachable(String),
}

impl ProviderError {
    /// Create an API error without an HTTP status
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
        }
    }

    /// Create an API error carrying the provider's HTTP status
    pub fn api_status(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Provider failures outside a transfer's source/destination reads.
///
/// Auth failures become `Unauthorized`; everything else is a `Provider` error.
impl From<ProviderError> for TransferError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Auth(msg) => {
                Self::Unauthorized(format!("provider rejected access: {msg}"))
            }
            other => Self::Provider(other.to_string()),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_when_known() {
        let err = ProviderError::api_status(422, "track is region locked");
        assert_eq!(
            err.to_string(),
            "Provider API error (422): track is region locked"
        );

        let err = ProviderError::api("boom");
        assert_eq!(err.to_string(), "Provider API error: boom");
    }

    #[test]
    fn provider_auth_failures_become_unauthorized() {
        let err: TransferError = ProviderError::Auth("token expired".into()).into();
        assert!(matches!(err, TransferError::Unauthorized(_)));
        assert_eq!(err.code(), "unauthorized");

        let err: TransferError = ProviderError::Unreachable("timeout".into()).into();
        assert_eq!(err.code(), "provider");
    }

    #[test]
    fn transfer_error_codes_are_stable() {
        assert_eq!(
            TransferError::invalid_reference("x").code(),
            "invalid_reference"
        );
        assert_eq!(
            TransferError::DestinationCreate("x".into()).code(),
            "destination_create"
        );
    }
}
