/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use setlist_core::TransferError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error("Storage error: {0}")]
    Storage(#[from] setlist_storage::StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

/// HTTP status for a transfer engine error
fn transfer_status(err: &TransferError) -> StatusCode {
    match err {
        TransferError::InvalidReference(_)
        | TransferError::InvalidCriteria(_)
        | TransferError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        TransferError::Unauthorized(_) => StatusCode::FORBIDDEN,
        TransferError::NotFound(_) => StatusCode::NOT_FOUND,
        TransferError::SourceUnavailable(_)
        | TransferError::DestinationUnavailable(_)
        | TransferError::DestinationCreate(_)
        | TransferError::Provider(_) => StatusCode::BAD_GATEWAY,
        TransferError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, kind, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, "auth", msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ServerError::Transfer(ref e) => {
                let status = transfer_status(e);
                if status.is_server_error() {
                    tracing::error!(kind = e.code(), "Transfer error: {}", e);
                } else {
                    tracing::debug!(kind = e.code(), "Transfer rejected: {}", e);
                }
                let message = match e {
                    TransferError::Storage(_) => "Storage error".to_string(),
                    other => other.to_string(),
                };
                (status, e.code(), message)
            }
            ServerError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage",
                    "Storage error".to_string(),
                )
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config",
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "auth", "Invalid token".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}
