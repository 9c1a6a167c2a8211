//! Gateway configuration and wire types.

use serde::{Deserialize, Serialize};
use setlist_core::{CreateSpec, Provider, ProviderPlaylist, Track};
use std::time::Duration;

/// Configuration for connecting to a provider gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Provider namespace served by the gateway
    pub provider: Provider,
    /// Base URL of the gateway (e.g., "https://gateway.example.com/spotify")
    pub base_url: String,
    /// Bearer token forwarded to the gateway
    pub access_token: Option<String>,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(provider: Provider, base_url: impl Into<String>) -> Self {
        Self {
            provider,
            base_url: base_url.into(),
            access_token: None,
            timeout: Duration::from_secs(15),
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Playlist as returned by the gateway.
#[derive(Debug, Deserialize)]
pub(crate) struct WirePlaylist {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub track_count: Option<u32>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl WirePlaylist {
    pub fn into_playlist(self, provider: Provider) -> ProviderPlaylist {
        ProviderPlaylist {
            provider,
            provider_playlist_id: self.id,
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            description: self.description,
            image_url: self.image_url,
            url: self.url,
            track_count: self.track_count,
            is_public: self.is_public,
        }
    }
}

/// Track as returned by the gateway.
#[derive(Debug, Deserialize)]
pub(crate) struct WireTrack {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<WireTrack> for Track {
    fn from(wire: WireTrack) -> Self {
        Track {
            provider_track_id: wire.id,
            title: wire.title.unwrap_or_else(|| "Untitled".to_string()),
            artist: wire.artist,
            genre: wire.genre,
            artwork_url: wire.artwork_url,
            url: wire.url,
        }
    }
}

/// Request body for playlist creation.
#[derive(Debug, Serialize)]
pub(crate) struct CreatePlaylistRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub is_public: bool,
}

impl<'a> From<&'a CreateSpec> for CreatePlaylistRequest<'a> {
    fn from(spec: &'a CreateSpec) -> Self {
        Self {
            title: &spec.title,
            description: spec.description.as_deref().unwrap_or_default(),
            is_public: spec.is_public.unwrap_or(false),
        }
    }
}

/// Request body for adding tracks.
#[derive(Debug, Serialize)]
pub(crate) struct AddTracksRequest<'a> {
    pub track_ids: &'a [String],
}

/// Error body shapes a gateway may send.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        [self.error, self.message, self.detail]
            .into_iter()
            .flatten()
            .map(|m| m.trim().to_string())
            .find(|m| !m.is_empty())
    }
}
