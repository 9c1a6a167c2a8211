/// Bearer-token authentication
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use setlist_core::UserId;
use std::sync::Arc;

/// Caller identity taken from the bearer token.
/// Inserted by `auth_middleware`; handlers take it as an extractor.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ServerError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ServerError::Auth("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ServerError::Auth("Authorization header is not valid text".to_string()))?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ServerError::Auth(
            "Authorization header must carry a bearer token".to_string(),
        )),
    }
}

/// Rejects the request unless it carries a token issued by `auth_service`
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let caller = {
        let token = bearer_token(request.headers())?;
        auth_service.verify_access_token(token).map_err(|err| {
            tracing::warn!(error = %err, path = %request.uri().path(), "Rejected bearer token");
            err
        })?
    };

    tracing::debug!(caller = %caller, "Authenticated request");
    request.extensions_mut().insert(AuthenticatedUser(caller));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
