//! In-memory collaborators for tests.
//!
//! `MemoryProvider` keeps playlists and their tracks in memory and can be
//! told to reject specific tracks, fail reads of a playlist, or fail playlist
//! creation. `MemoryDirectory` is a `Vec`-backed internal playlist store.

use async_trait::async_trait;
use chrono::Utc;
use setlist_core::{
    fold_value, CreateSpec, InternalPlaylist, InternalPlaylistId, MusicProvider,
    PlaylistDirectory, Provider, ProviderError, ProviderPlaylist, ProviderResult, Result, Track,
    UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct ProviderState {
    /// Insertion order is the account's playlist order
    playlists: Vec<ProviderPlaylist>,
    owned: HashSet<String>,
    tracks: HashMap<String, Vec<Track>>,
    catalog: HashMap<String, Track>,
    rejected: HashSet<String>,
    failing_reads: HashMap<String, ProviderError>,
    failing_create: Option<ProviderError>,
    created: usize,
    add_calls: Vec<Vec<String>>,
}

pub struct MemoryProvider {
    provider: Provider,
    state: Mutex<ProviderState>,
}

impl MemoryProvider {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            state: Mutex::new(ProviderState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a playlist owned by the provider account
    pub fn add_playlist(&self, id: &str, title: &str, tracks: Vec<Track>) -> ProviderPlaylist {
        let playlist = self.insert_playlist(id, title, tracks);
        self.state().owned.insert(id.to_string());
        playlist
    }

    /// Add a playlist visible to search and link resolution but not owned by the account
    pub fn add_public_playlist(
        &self,
        id: &str,
        title: &str,
        tracks: Vec<Track>,
    ) -> ProviderPlaylist {
        self.insert_playlist(id, title, tracks)
    }

    fn insert_playlist(&self, id: &str, title: &str, tracks: Vec<Track>) -> ProviderPlaylist {
        let mut playlist = ProviderPlaylist::new(self.provider, id, title);
        playlist.url = Some(self.playlist_url(id));
        playlist.track_count = Some(tracks.len() as u32);

        let mut state = self.state();
        for track in &tracks {
            state
                .catalog
                .insert(track.provider_track_id.clone(), track.clone());
        }
        state.tracks.insert(id.to_string(), tracks);
        state.playlists.retain(|p| p.provider_playlist_id != id);
        state.playlists.push(playlist.clone());
        playlist
    }

    /// Canonical URL the fake answers to in `resolve_playlist_url`
    pub fn playlist_url(&self, id: &str) -> String {
        match self.provider {
            Provider::Soundcloud => format!("https://soundcloud.com/fake/sets/{id}"),
            Provider::Spotify => format!("https://open.spotify.com/playlist/{id}"),
        }
    }

    /// Make every `add_tracks` call containing this id fail
    pub fn reject_track(&self, track_id: &str) {
        self.state().rejected.insert(track_id.to_string());
    }

    /// Make `get_playlist` and `list_tracks` fail for a playlist
    pub fn fail_reads(&self, playlist_id: &str, error: ProviderError) {
        self.state()
            .failing_reads
            .insert(playlist_id.to_string(), error);
    }

    pub fn fail_create(&self, error: ProviderError) {
        self.state().failing_create = Some(error);
    }

    /// Current track ids of a playlist, in order
    pub fn track_ids(&self, playlist_id: &str) -> Vec<String> {
        self.state()
            .tracks
            .get(playlist_id)
            .map(|tracks| tracks.iter().map(|t| t.provider_track_id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn created_count(&self) -> usize {
        self.state().created
    }

    /// Every `add_tracks` call received, in order
    pub fn add_calls(&self) -> Vec<Vec<String>> {
        self.state().add_calls.clone()
    }

    fn check_read(state: &ProviderState, playlist_id: &str) -> ProviderResult<()> {
        match state.failing_reads.get(playlist_id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn find(state: &ProviderState, playlist_id: &str) -> ProviderResult<ProviderPlaylist> {
        state
            .playlists
            .iter()
            .find(|p| p.provider_playlist_id == playlist_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("playlist {playlist_id}")))
    }
}

#[async_trait]
impl MusicProvider for MemoryProvider {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn list_playlists(&self) -> ProviderResult<Vec<ProviderPlaylist>> {
        let state = self.state();
        Ok(state
            .playlists
            .iter()
            .filter(|p| state.owned.contains(&p.provider_playlist_id))
            .cloned()
            .collect())
    }

    async fn get_playlist(&self, provider_playlist_id: &str) -> ProviderResult<ProviderPlaylist> {
        let state = self.state();
        Self::check_read(&state, provider_playlist_id)?;
        Self::find(&state, provider_playlist_id)
    }

    async fn search_playlists(
        &self,
        query: &str,
        limit: usize,
    ) -> ProviderResult<Vec<ProviderPlaylist>> {
        let needle = fold_value(query);
        Ok(self
            .state()
            .playlists
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn resolve_playlist_url(&self, url: &str) -> ProviderResult<ProviderPlaylist> {
        self.state()
            .playlists
            .iter()
            .find(|p| p.url.as_deref() == Some(url))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("no playlist at {url}")))
    }

    async fn create_playlist(&self, spec: &CreateSpec) -> ProviderResult<ProviderPlaylist> {
        if let Some(err) = self.state().failing_create.clone() {
            return Err(err);
        }
        let id = {
            let mut state = self.state();
            state.created += 1;
            format!("created-{}", state.created)
        };
        let mut playlist = self.add_playlist(&id, &spec.title, Vec::new());
        playlist.description.clone_from(&spec.description);
        playlist.is_public = spec.is_public;
        Ok(playlist)
    }

    async fn list_tracks(&self, provider_playlist_id: &str) -> ProviderResult<Vec<Track>> {
        let state = self.state();
        Self::check_read(&state, provider_playlist_id)?;
        state
            .tracks
            .get(provider_playlist_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("playlist {provider_playlist_id}")))
    }

    async fn add_tracks(
        &self,
        provider_playlist_id: &str,
        track_ids: &[String],
    ) -> ProviderResult<()> {
        let mut state = self.state();
        state.add_calls.push(track_ids.to_vec());

        if let Some(rejected) = track_ids.iter().find(|id| state.rejected.contains(*id)) {
            return Err(ProviderError::api_status(
                422,
                format!("track {rejected} cannot be added"),
            ));
        }

        let added: Vec<Track> = track_ids
            .iter()
            .map(|id| {
                state
                    .catalog
                    .get(id)
                    .cloned()
                    .unwrap_or_else(|| Track::new(id.clone(), id.clone()))
            })
            .collect();
        let tracks = state
            .tracks
            .get_mut(provider_playlist_id)
            .ok_or_else(|| ProviderError::NotFound(format!("playlist {provider_playlist_id}")))?;
        tracks.extend(added);
        Ok(())
    }
}

/// `PlaylistDirectory` over a `Vec`
#[derive(Default)]
pub struct MemoryDirectory {
    playlists: Mutex<Vec<InternalPlaylist>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn playlists(&self) -> MutexGuard<'_, Vec<InternalPlaylist>> {
        self.playlists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a provider playlist for an owner
    pub fn register(
        &self,
        owner: &str,
        provider: Provider,
        provider_playlist_id: &str,
        title: &str,
    ) -> InternalPlaylist {
        let mut playlists = self.playlists();
        let playlist = InternalPlaylist {
            id: playlists.len() as InternalPlaylistId + 1,
            owner_user_id: UserId::new(owner),
            provider,
            provider_playlist_id: provider_playlist_id.to_string(),
            title: title.to_string(),
            image_url: None,
            created_at: Utc::now(),
        };
        playlists.push(playlist.clone());
        playlist
    }
}

#[async_trait]
impl PlaylistDirectory for MemoryDirectory {
    async fn get_playlist(&self, id: InternalPlaylistId) -> Result<Option<InternalPlaylist>> {
        Ok(self.playlists().iter().find(|p| p.id == id).cloned())
    }

    async fn list_owned(&self, owner: &UserId) -> Result<Vec<InternalPlaylist>> {
        let mut owned: Vec<InternalPlaylist> = self
            .playlists()
            .iter()
            .filter(|p| p.is_owned_by(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        Ok(owned)
    }

    async fn search_owned(
        &self,
        owner: &UserId,
        query: &str,
        limit: usize,
    ) -> Result<Vec<InternalPlaylist>> {
        let needle = fold_value(query);
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut found = self.list_owned(owner).await?;
        found.retain(|p| p.title.to_lowercase().contains(&needle));
        found.truncate(limit);
        Ok(found)
    }
}
