//! Counterparty Resolver
//!
//! Offers the playlists a caller may transfer to or from, relative to an
//! anchor: the caller-owned internal playlist they are acting from.

use serde::{Deserialize, Serialize};
use setlist_core::{
    fold_value, looks_like_link, normalize_playlist_link, CounterpartyCandidate, InternalPlaylist,
    InternalPlaylistId, PlaylistDirectory, ProviderError, ProviderPlaylist, Result, TransferError,
    UserId,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::endpoints;
use crate::limits::TransferLimits;
use crate::registry::ProviderRegistry;

/// Where a counterparty search looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// The anchor's music provider
    #[default]
    Provider,
    /// The caller's own internal playlists
    Internal,
}

#[derive(Clone)]
pub struct CounterpartyResolver {
    providers: ProviderRegistry,
    directory: Arc<dyn PlaylistDirectory>,
    limits: TransferLimits,
}

impl CounterpartyResolver {
    pub fn new(
        providers: ProviderRegistry,
        directory: Arc<dyn PlaylistDirectory>,
        limits: TransferLimits,
    ) -> Self {
        Self {
            providers,
            directory,
            limits,
        }
    }

    async fn anchor(
        &self,
        caller: &UserId,
        anchor_id: InternalPlaylistId,
    ) -> Result<InternalPlaylist> {
        endpoints::owned_internal(self.directory.as_ref(), caller, anchor_id)
            .await?
            .ok_or_else(|| TransferError::NotFound(format!("playlist {anchor_id} not found")))
    }

    /// The caller's playlists on the anchor's provider, excluding the anchor.
    ///
    /// Covers both the caller's provider account and their internal playlists.
    pub async fn my_playlists(
        &self,
        caller: &UserId,
        anchor_id: InternalPlaylistId,
    ) -> Result<Vec<CounterpartyCandidate>> {
        let anchor = self.anchor(caller, anchor_id).await?;
        let client = self.providers.get(anchor.provider)?;

        let mut candidates: Vec<CounterpartyCandidate> = client
            .list_playlists()
            .await?
            .into_iter()
            .filter(|playlist| is_eligible(&anchor, playlist))
            .map(|playlist| provider_candidate(&playlist))
            .collect();

        candidates.extend(
            self.directory
                .list_owned(caller)
                .await?
                .iter()
                .filter(|playlist| playlist.provider == anchor.provider && playlist.id != anchor.id)
                .map(internal_candidate),
        );

        debug!(
            caller = %caller,
            anchor = anchor.id,
            count = candidates.len(),
            "Listed my playlists"
        );
        Ok(merge_candidates(candidates, Vec::new()))
    }

    /// Free-text search for counterparties.
    ///
    /// An empty query finds nothing. A query that looks like a link is
    /// resolved as one instead of searched.
    pub async fn search(
        &self,
        caller: &UserId,
        anchor_id: InternalPlaylistId,
        query: &str,
        scope: SearchScope,
    ) -> Result<Vec<CounterpartyCandidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        if looks_like_link(query) {
            return Ok(vec![self.resolve_link(caller, anchor_id, query).await?]);
        }

        let anchor = self.anchor(caller, anchor_id).await?;
        let limit = self.limits.search_limit;

        let results: Vec<CounterpartyCandidate> = match scope {
            SearchScope::Provider => {
                let client = self.providers.get(anchor.provider)?;
                client
                    .search_playlists(query, limit)
                    .await?
                    .into_iter()
                    .filter(|playlist| is_eligible(&anchor, playlist))
                    .map(|playlist| provider_candidate(&playlist))
                    .collect()
            }
            SearchScope::Internal => self
                .directory
                // One extra row in case the anchor itself matches
                .search_owned(caller, query, limit + 1)
                .await?
                .iter()
                .filter(|playlist| playlist.provider == anchor.provider && playlist.id != anchor.id)
                .take(limit)
                .map(internal_candidate)
                .collect(),
        };

        debug!(
            caller = %caller,
            anchor = anchor.id,
            query,
            ?scope,
            count = results.len(),
            "Searched counterparties"
        );
        Ok(merge_candidates(Vec::new(), results))
    }

    /// Candidates for a browse box: matching "my playlists" plus search hits.
    ///
    /// Without a query this is just `my_playlists`.
    pub async fn browse(
        &self,
        caller: &UserId,
        anchor_id: InternalPlaylistId,
        query: Option<&str>,
        scope: SearchScope,
    ) -> Result<Vec<CounterpartyCandidate>> {
        let mine = self.my_playlists(caller, anchor_id).await?;
        let query = query.map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return Ok(mine);
        }

        let needle = fold_value(query);
        let mine: Vec<CounterpartyCandidate> = mine
            .into_iter()
            .filter(|candidate| candidate.label.to_lowercase().contains(&needle))
            .collect();
        let found = self.search(caller, anchor_id, query, scope).await?;
        Ok(merge_candidates(mine, found))
    }

    /// Resolve a pasted playlist link to a single eligible candidate.
    ///
    /// Links to another provider, unresolvable links and links to the anchor
    /// itself are rejected as invalid references.
    pub async fn resolve_link(
        &self,
        caller: &UserId,
        anchor_id: InternalPlaylistId,
        link: &str,
    ) -> Result<CounterpartyCandidate> {
        let anchor = self.anchor(caller, anchor_id).await?;
        let normalized = normalize_playlist_link(link)?;

        if normalized.provider != anchor.provider {
            return Err(TransferError::invalid_reference(format!(
                "link points to a {} playlist but this playlist is on {}",
                normalized.provider, anchor.provider
            )));
        }

        let client = self.providers.get(anchor.provider)?;
        let mut playlist = client
            .resolve_playlist_url(&normalized.url)
            .await
            .map_err(|err| match err {
                ProviderError::NotFound(_) => TransferError::invalid_reference(format!(
                    "no playlist found at {}",
                    normalized.url
                )),
                other => TransferError::from(other),
            })?;
        playlist.provider = anchor.provider;

        if playlist.provider_playlist_id == anchor.provider_playlist_id {
            return Err(TransferError::invalid_reference(
                "a playlist cannot be its own counterparty",
            ));
        }

        info!(
            caller = %caller,
            anchor = anchor.id,
            url = %normalized.url,
            provider_playlist_id = %playlist.provider_playlist_id,
            "Resolved playlist link"
        );
        Ok(provider_candidate(&playlist))
    }
}

fn is_eligible(anchor: &InternalPlaylist, playlist: &ProviderPlaylist) -> bool {
    playlist.provider == anchor.provider
        && playlist.provider_playlist_id != anchor.provider_playlist_id
}

fn provider_candidate(playlist: &ProviderPlaylist) -> CounterpartyCandidate {
    CounterpartyCandidate::new(
        playlist.reference(),
        playlist.title.clone(),
        playlist.image_url.clone(),
    )
}

fn internal_candidate(playlist: &InternalPlaylist) -> CounterpartyCandidate {
    CounterpartyCandidate::new(
        playlist.reference(),
        playlist.title.clone(),
        playlist.image_url.clone(),
    )
}

/// Merge "my playlists" with search results.
///
/// Candidates are deduplicated by canonical key with `mine` taking
/// precedence, then sorted by label (case-insensitive), ties broken by key.
pub fn merge_candidates(
    mine: Vec<CounterpartyCandidate>,
    found: Vec<CounterpartyCandidate>,
) -> Vec<CounterpartyCandidate> {
    let mut seen = HashSet::new();
    let mut merged: Vec<CounterpartyCandidate> = mine
        .into_iter()
        .chain(found)
        .filter(|candidate| seen.insert(candidate.key.clone()))
        .collect();

    merged.sort_by(|a, b| {
        a.label
            .to_lowercase()
            .cmp(&b.label.to_lowercase())
            .then_with(|| a.key.cmp(&b.key))
    });
    merged
}
