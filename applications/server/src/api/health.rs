/// Health check API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use setlist_core::Provider;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Providers with a configured gateway
    pub providers: Vec<Provider>,
    pub max_tracks_per_action: usize,
}

/// GET /api/health
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        providers: app_state.transfers.providers().providers(),
        max_tracks_per_action: app_state.transfers.limits().max_tracks_per_action,
    })
}
