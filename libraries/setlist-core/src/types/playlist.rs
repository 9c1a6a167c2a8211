/// Playlist references and summaries
use crate::types::{InternalPlaylistId, Provider, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to a playlist, either hosted by a provider or owned by this system.
///
/// Two references denote the same entity iff tag and identifying fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaylistRef {
    Provider {
        provider: Provider,
        provider_playlist_id: String,
    },
    Internal {
        internal_playlist_id: InternalPlaylistId,
    },
}

impl PlaylistRef {
    pub fn provider(provider: Provider, provider_playlist_id: impl Into<String>) -> Self {
        Self::Provider {
            provider,
            provider_playlist_id: provider_playlist_id.into(),
        }
    }

    pub fn internal(internal_playlist_id: InternalPlaylistId) -> Self {
        Self::Internal {
            internal_playlist_id,
        }
    }

    /// Canonical identity key, used to deduplicate counterparty candidates
    pub fn key(&self) -> String {
        match self {
            Self::Provider {
                provider,
                provider_playlist_id,
            } => format!("provider:{}:{}", provider, provider_playlist_id),
            Self::Internal {
                internal_playlist_id,
            } => format!("internal:{}", internal_playlist_id),
        }
    }
}

/// Instructions for creating a new destination playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpec {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
}

impl CreateSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_public: None,
        }
    }
}

/// Where transferred tracks go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSpec {
    /// An existing playlist
    Existing(PlaylistRef),
    /// A playlist created by execute before any track is added
    Create(CreateSpec),
}

/// Playlist metadata as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderPlaylist {
    pub provider: Provider,
    pub provider_playlist_id: String,
    pub title: String,
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

impl ProviderPlaylist {
    pub fn new(
        provider: Provider,
        provider_playlist_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            provider_playlist_id: provider_playlist_id.into(),
            title: title.into(),
            description: None,
            image_url: None,
            url: None,
            track_count: None,
            is_public: None,
        }
    }

    pub fn reference(&self) -> PlaylistRef {
        PlaylistRef::provider(self.provider, self.provider_playlist_id.clone())
    }

    pub fn summary(&self) -> PlaylistSummary {
        PlaylistSummary {
            provider: self.provider,
            provider_playlist_id: self.provider_playlist_id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            url: self.url.clone(),
        }
    }
}

/// Compact description of a resolved playlist, returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub provider: Provider,
    pub provider_playlist_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A playlist registered in the internal ownership store.
///
/// It mirrors exactly one provider playlist; track membership always lives at
/// the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalPlaylist {
    pub id: InternalPlaylistId,
    pub owner_user_id: UserId,
    pub provider: Provider,
    pub provider_playlist_id: String,
    pub title: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InternalPlaylist {
    pub fn reference(&self) -> PlaylistRef {
        PlaylistRef::internal(self.id)
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_user_id == user_id
    }
}
