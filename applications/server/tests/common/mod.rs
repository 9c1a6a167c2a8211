//! Common test utilities
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use setlist_core::{Provider, Track, UserId};
use setlist_server::{create_router, services::AuthService, state::AppState};
use setlist_transfer::testing::{MemoryDirectory, MemoryProvider};
use setlist_transfer::{ProviderRegistry, TransferLimits};
use std::sync::Arc;
use tower::util::ServiceExt;

pub const OWNER: &str = "owner-1";
pub const SECRET: &str = "test-secret-key";

/// Router wired to in-memory collaborators
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MemoryProvider>,
    pub directory: Arc<MemoryDirectory>,
    pub auth_service: Arc<AuthService>,
}

impl TestApp {
    pub fn new() -> Self {
        let provider = Arc::new(MemoryProvider::new(Provider::Soundcloud));
        let directory = Arc::new(MemoryDirectory::new());
        let auth_service = Arc::new(AuthService::new(SECRET.to_string(), 1));

        let app_state = AppState::new(
            ProviderRegistry::new().with(provider.clone()),
            directory.clone(),
            TransferLimits::default(),
            Arc::clone(&auth_service),
        );

        Self {
            router: create_router(app_state),
            provider,
            directory,
            auth_service,
        }
    }

    pub fn token(&self, user: &str) -> String {
        self.auth_service
            .create_access_token(&UserId::new(user))
            .unwrap()
    }

    /// Send a request and decode the JSON body (Null when the body is empty)
    pub async fn send(&self, request: Request<Body>) -> (u16, serde_json::Value) {
        let response: Response<Body> = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> (u16, serde_json::Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(
        &self,
        uri: &str,
        user: Option<&str>,
        body: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

/// `count` tracks with ids `<prefix>1..=<prefix>count`
pub fn tracks(prefix: &str, count: usize) -> Vec<Track> {
    (1..=count)
        .map(|n| Track::new(format!("{prefix}{n}"), format!("Track {prefix}{n}")))
        .collect()
}

pub fn soundcloud_ref(id: &str) -> serde_json::Value {
    serde_json::json!({
        "kind": "provider",
        "provider": "soundcloud",
        "provider_playlist_id": id,
    })
}
