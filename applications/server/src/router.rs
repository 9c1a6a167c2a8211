/// HTTP routing
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router. Everything under `/api` except health needs a bearer token.
pub fn create_router(app_state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(api::health::health));

    let protected_routes = Router::new()
        // Transfers
        .route("/transfer/preview", post(api::transfer::preview))
        .route("/transfer/execute", post(api::transfer::execute))
        .route("/transfer/source-tracks", post(api::transfer::source_tracks))
        .route("/transfer/facets", post(api::transfer::facets))
        // Counterparties
        .route(
            "/playlists/:id/counterparties",
            get(api::counterparties::list_counterparties),
        )
        .route(
            "/playlists/:id/counterparties/search",
            get(api::counterparties::search_counterparties),
        )
        .route(
            "/playlists/:id/counterparties/resolve",
            get(api::counterparties::resolve_counterparty),
        )
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&app_state.auth_service),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
