/// Transfer API routes
use crate::{error::Result, extract::ApiJson, middleware::AuthenticatedUser, state::AppState};
use axum::{extract::State, Json};
use serde::Deserialize;
use setlist_core::{
    PlaylistRef, SourceFacets, SourceTracksPage, TransferRequest, TransferResult, TransferSummary,
};
use setlist_transfer::SourceTracksQuery;

#[derive(Debug, Deserialize)]
pub struct FacetsRequest {
    pub source: PlaylistRef,
}

/// POST /api/transfer/preview
/// Simulate a transfer without touching either playlist
pub async fn preview(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<TransferRequest>,
) -> Result<Json<TransferSummary>> {
    let summary = app_state.transfers.preview(auth.user_id(), &req).await?;
    Ok(Json(summary))
}

/// POST /api/transfer/execute
/// Perform a transfer. Per-track failures are reported in the body, not as an error status.
pub async fn execute(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<TransferRequest>,
) -> Result<Json<TransferResult>> {
    let result = app_state.transfers.execute(auth.user_id(), &req).await?;
    Ok(Json(result))
}

/// POST /api/transfer/source-tracks
pub async fn source_tracks(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<SourceTracksQuery>,
) -> Result<Json<SourceTracksPage>> {
    let page = app_state
        .transfers
        .list_source_tracks(auth.user_id(), &req)
        .await?;
    Ok(Json(page))
}

/// POST /api/transfer/facets
pub async fn facets(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
    ApiJson(req): ApiJson<FacetsRequest>,
) -> Result<Json<SourceFacets>> {
    let facets = app_state
        .transfers
        .list_facets(auth.user_id(), &req.source)
        .await?;
    Ok(Json(facets))
}
