/// Counterparty API routes, relative to the playlist the caller is acting from
use crate::{
    error::{Result, ServerError},
    extract::{ApiPath, ApiQuery},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use setlist_core::{CounterpartyCandidate, InternalPlaylistId};
use setlist_transfer::SearchScope;

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub scope: SearchScope,
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub url: String,
}

/// GET /api/playlists/:id/counterparties
/// The caller's playlists, merged with search hits when `q` is given
pub async fn list_counterparties(
    ApiPath(id): ApiPath<InternalPlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiQuery(params): ApiQuery<BrowseParams>,
) -> Result<Json<Vec<CounterpartyCandidate>>> {
    let candidates = app_state
        .counterparties
        .browse(auth.user_id(), id, params.q.as_deref(), params.scope)
        .await?;
    Ok(Json(candidates))
}

/// GET /api/playlists/:id/counterparties/search?q=&scope=
pub async fn search_counterparties(
    ApiPath(id): ApiPath<InternalPlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiQuery(params): ApiQuery<BrowseParams>,
) -> Result<Json<Vec<CounterpartyCandidate>>> {
    let query = params.q.unwrap_or_default();
    let candidates = app_state
        .counterparties
        .search(auth.user_id(), id, &query, params.scope)
        .await?;
    Ok(Json(candidates))
}

/// GET /api/playlists/:id/counterparties/resolve?url=
pub async fn resolve_counterparty(
    ApiPath(id): ApiPath<InternalPlaylistId>,
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiQuery(params): ApiQuery<ResolveParams>,
) -> Result<Json<CounterpartyCandidate>> {
    if params.url.trim().is_empty() {
        return Err(ServerError::BadRequest("url is required".to_string()));
    }
    let candidate = app_state
        .counterparties
        .resolve_link(auth.user_id(), id, &params.url)
        .await?;
    Ok(Json(candidate))
}
