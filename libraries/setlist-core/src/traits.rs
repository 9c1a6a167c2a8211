//! Collaborator traits consumed by the transfer engine

use crate::error::{ProviderResult, Result};
use crate::types::{
    CreateSpec, InternalPlaylist, InternalPlaylistId, Provider, ProviderPlaylist, Track, UserId,
};
use async_trait::async_trait;

/// External music provider API, scoped to one provider namespace.
///
/// Implementations perform the actual playlist reads and the add-to-playlist
/// mutation. Batching of `add_tracks` is done by the caller.
#[async_trait]
pub trait MusicProvider: Send + Sync {
    /// Provider namespace this client talks to
    fn provider(&self) -> Provider;

    /// Playlists owned by the authenticated provider account
    async fn list_playlists(&self) -> ProviderResult<Vec<ProviderPlaylist>>;

    async fn get_playlist(&self, provider_playlist_id: &str) -> ProviderResult<ProviderPlaylist>;

    /// Free-text playlist search
    async fn search_playlists(&self, query: &str, limit: usize)
        -> ProviderResult<Vec<ProviderPlaylist>>;

    /// Resolve a normalized playlist URL to canonical playlist metadata
    async fn resolve_playlist_url(&self, url: &str) -> ProviderResult<ProviderPlaylist>;

    async fn create_playlist(&self, spec: &CreateSpec) -> ProviderResult<ProviderPlaylist>;

    /// Current tracks of a playlist, in playlist order
    async fn list_tracks(&self, provider_playlist_id: &str) -> ProviderResult<Vec<Track>>;

    /// Append tracks to a playlist. Either all ids are added or an error is returned.
    async fn add_tracks(&self, provider_playlist_id: &str, track_ids: &[String])
        -> ProviderResult<()>;
}

/// Internal playlist-ownership store
#[async_trait]
pub trait PlaylistDirectory: Send + Sync {
    async fn get_playlist(&self, id: InternalPlaylistId) -> Result<Option<InternalPlaylist>>;

    /// Playlists owned by a user, ordered by title
    async fn list_owned(&self, owner: &UserId) -> Result<Vec<InternalPlaylist>>;

    /// Case-insensitive title search over one owner's playlists, ordered by title
    async fn search_owned(
        &self,
        owner: &UserId,
        query: &str,
        limit: usize,
    ) -> Result<Vec<InternalPlaylist>>;
}
