//! Resolution of transfer endpoints to concrete provider playlists

use setlist_core::{
    InternalPlaylist, InternalPlaylistId, MusicProvider, PlaylistDirectory, PlaylistRef,
    PlaylistSummary, Provider, ProviderError, ProviderPlaylist, Result, Track, TransferError,
    UserId,
};
use tracing::debug;

use crate::registry::ProviderRegistry;

/// Which end of a transfer a playlist sits on; decides how read failures surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Source,
    Destination,
}

impl Side {
    fn unavailable(self, message: String) -> TransferError {
        match self {
            Side::Source => TransferError::SourceUnavailable(message),
            Side::Destination => TransferError::DestinationUnavailable(message),
        }
    }

    fn read_error(self, err: ProviderError) -> TransferError {
        match err {
            ProviderError::Auth(msg) => {
                TransferError::unauthorized(format!("provider rejected access: {msg}"))
            }
            other => self.unavailable(other.to_string()),
        }
    }
}

/// A `PlaylistRef` resolved to the provider playlist it denotes.
///
/// Internal references resolve through the directory to the provider
/// playlist they mirror, so two resolved playlists are the same entity iff
/// provider and provider id match.
#[derive(Debug, Clone)]
pub struct ResolvedPlaylist {
    pub reference: PlaylistRef,
    pub playlist: ProviderPlaylist,
}

impl ResolvedPlaylist {
    pub fn provider(&self) -> Provider {
        self.playlist.provider
    }

    pub fn provider_playlist_id(&self) -> &str {
        &self.playlist.provider_playlist_id
    }

    pub fn label(&self) -> &str {
        &self.playlist.title
    }

    pub fn summary(&self) -> PlaylistSummary {
        self.playlist.summary()
    }

    pub fn is_same_playlist(&self, other: &ResolvedPlaylist) -> bool {
        self.provider() == other.provider()
            && self.provider_playlist_id() == other.provider_playlist_id()
    }
}

/// Look up an internal playlist the caller owns
pub(crate) async fn owned_internal(
    directory: &dyn PlaylistDirectory,
    caller: &UserId,
    id: InternalPlaylistId,
) -> Result<Option<InternalPlaylist>> {
    let Some(playlist) = directory.get_playlist(id).await? else {
        return Ok(None);
    };
    if !playlist.is_owned_by(caller) {
        return Err(TransferError::unauthorized(
            "only playlists you own can be used for transfers",
        ));
    }
    Ok(Some(playlist))
}

/// Resolve a transfer endpoint, enforcing ownership of internal playlists
pub(crate) async fn resolve(
    providers: &ProviderRegistry,
    directory: &dyn PlaylistDirectory,
    caller: &UserId,
    reference: &PlaylistRef,
    side: Side,
) -> Result<ResolvedPlaylist> {
    let (provider, provider_playlist_id, fallback_title) = match reference {
        PlaylistRef::Provider {
            provider,
            provider_playlist_id,
        } => {
            if provider_playlist_id.trim().is_empty() {
                return Err(TransferError::invalid_reference(
                    "provider playlist id is empty",
                ));
            }
            (*provider, provider_playlist_id.clone(), None)
        }
        PlaylistRef::Internal {
            internal_playlist_id,
        } => {
            let internal = owned_internal(directory, caller, *internal_playlist_id)
                .await?
                .ok_or_else(|| {
                    side.unavailable(format!("playlist {internal_playlist_id} not found"))
                })?;
            (
                internal.provider,
                internal.provider_playlist_id,
                Some(internal.title),
            )
        }
    };

    let client = providers.get(provider)?;
    let mut playlist = client
        .get_playlist(&provider_playlist_id)
        .await
        .map_err(|e| side.read_error(e))?;

    // The reference is authoritative for identity; the provider only adds metadata
    playlist.provider = provider;
    playlist.provider_playlist_id = provider_playlist_id;
    if playlist.title.trim().is_empty() {
        if let Some(title) = fallback_title {
            playlist.title = title;
        }
    }

    debug!(
        reference = %reference.key(),
        provider = %playlist.provider,
        provider_playlist_id = %playlist.provider_playlist_id,
        ?side,
        "Resolved playlist"
    );

    Ok(ResolvedPlaylist {
        reference: reference.clone(),
        playlist,
    })
}

/// Current tracks of a resolved playlist
pub(crate) async fn read_tracks(
    client: &dyn MusicProvider,
    playlist: &ResolvedPlaylist,
    side: Side,
) -> Result<Vec<Track>> {
    client
        .list_tracks(playlist.provider_playlist_id())
        .await
        .map_err(|e| side.read_error(e))
}
