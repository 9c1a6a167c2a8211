//! Transfer Preview and Execute

use setlist_core::{
    CreateSpec, DestinationSpec, FailedItem, MusicProvider, PlaylistDirectory, Result,
    SelectionMode, Track, TransferError, TransferRequest, TransferResult, TransferSummary, UserId,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::endpoints::{self, ResolvedPlaylist, Side};
use crate::evaluator;
use crate::limits::TransferLimits;
use crate::registry::ProviderRegistry;

/// Two-phase transfer of tracks between playlists.
///
/// `preview` and `execute` share the same planning step: criteria are
/// sanitized, both ends resolved and the source matched fresh on every call.
/// Nothing is cached between calls, so a preview may go stale before the
/// matching execute runs.
#[derive(Clone)]
pub struct TransferService {
    pub(crate) providers: ProviderRegistry,
    pub(crate) directory: Arc<dyn PlaylistDirectory>,
    pub(crate) limits: TransferLimits,
}

/// Destination as known before any mutation
enum PlannedDestination {
    Existing(ResolvedPlaylist),
    Create(CreateSpec),
}

impl PlannedDestination {
    fn label(&self) -> &str {
        match self {
            PlannedDestination::Existing(playlist) => playlist.label(),
            PlannedDestination::Create(spec) => &spec.title,
        }
    }
}

struct TransferPlan {
    client: Arc<dyn MusicProvider>,
    source: ResolvedPlaylist,
    source_tracks: Vec<Track>,
    destination: PlannedDestination,
    mode: SelectionMode,
    values: Vec<String>,
    matched: Vec<Track>,
}

impl TransferPlan {
    /// Track ids already in an existing destination
    async fn destination_ids(&self, destination: &ResolvedPlaylist) -> Result<HashSet<String>> {
        let tracks = if destination.is_same_playlist(&self.source) {
            self.source_tracks.clone()
        } else {
            endpoints::read_tracks(self.client.as_ref(), destination, Side::Destination).await?
        };

        Ok(tracks
            .into_iter()
            .map(|track| track.provider_track_id)
            .filter(|id| !id.is_empty())
            .collect())
    }
}

/// Split matched tracks into (to add, duplicates), both in matched order
fn partition(matched: &[Track], existing: &HashSet<String>) -> (Vec<Track>, Vec<Track>) {
    matched
        .iter()
        .cloned()
        .partition(|track| !existing.contains(&track.provider_track_id))
}

impl TransferService {
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

    pub fn limits(&self) -> &TransferLimits {
        &self.limits
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    async fn plan(&self, caller: &UserId, request: &TransferRequest) -> Result<TransferPlan> {
        let values = request.criteria.sanitized_values()?;

        if let DestinationSpec::Create(spec) = &request.destination {
            if spec.title.trim().is_empty() {
                return Err(TransferError::invalid_request(
                    "a title is required to create the destination playlist",
                ));
            }
        }

        let source = endpoints::resolve(
            &self.providers,
            self.directory.as_ref(),
            caller,
            &request.source,
            Side::Source,
        )
        .await?;

        let destination = match &request.destination {
            DestinationSpec::Existing(reference) => {
                let destination = endpoints::resolve(
                    &self.providers,
                    self.directory.as_ref(),
                    caller,
                    reference,
                    Side::Destination,
                )
                .await?;
                if destination.provider() != source.provider() {
                    return Err(TransferError::invalid_reference(format!(
                        "cross-provider transfers are not supported ({} to {})",
                        source.provider(),
                        destination.provider()
                    )));
                }
                PlannedDestination::Existing(destination)
            }
            DestinationSpec::Create(spec) => PlannedDestination::Create(spec.clone()),
        };

        let client = self.providers.get(source.provider())?;
        let source_tracks = endpoints::read_tracks(client.as_ref(), &source, Side::Source).await?;
        let matched = evaluator::match_tracks(&source_tracks, request.criteria.mode, &values);

        debug!(
            source = %source.reference.key(),
            mode = request.criteria.mode.as_str(),
            source_tracks = source_tracks.len(),
            matched = matched.len(),
            "Matched source tracks"
        );

        Ok(TransferPlan {
            client,
            source,
            source_tracks,
            destination,
            mode: request.criteria.mode,
            values,
            matched,
        })
    }

    /// Read-only simulation of `execute`.
    ///
    /// Counts are reported uncapped; `capacity_exceeded` tells the caller that
    /// execute will add only the first `max_tracks_per_action` tracks.
    pub async fn preview(
        &self,
        caller: &UserId,
        request: &TransferRequest,
    ) -> Result<TransferSummary> {
        let plan = self.plan(caller, request).await?;

        let existing = match &plan.destination {
            PlannedDestination::Existing(destination) => plan.destination_ids(destination).await?,
            PlannedDestination::Create(_) => HashSet::new(),
        };
        let (to_add, duplicates) = partition(&plan.matched, &existing);

        let sample = self.limits.preview_sample_size;
        let summary = TransferSummary {
            source_label: plan.source.label().to_string(),
            destination_label: plan.destination.label().to_string(),
            source: plan.source.summary(),
            destination: match &plan.destination {
                PlannedDestination::Existing(destination) => Some(destination.summary()),
                PlannedDestination::Create(_) => None,
            },
            selection_mode: plan.mode,
            selection_values: plan.values,
            matched_count: plan.matched.len(),
            to_add_count: to_add.len(),
            duplicate_count: duplicates.len(),
            max_tracks_per_action: self.limits.max_tracks_per_action,
            capacity_exceeded: to_add.len() > self.limits.max_tracks_per_action,
            matched_sample: plan.matched.iter().take(sample).cloned().collect(),
            duplicate_sample: duplicates.into_iter().take(sample).collect(),
        };

        info!(
            caller = %caller,
            source = %plan.source.reference.key(),
            matched = summary.matched_count,
            to_add = summary.to_add_count,
            duplicates = summary.duplicate_count,
            "Transfer preview"
        );

        Ok(summary)
    }

    /// Perform the transfer.
    ///
    /// Fatal errors only happen before the first track is attempted. Once adds
    /// begin, each track either lands or is reported in `failed_items`. A
    /// destination created here is kept even if every add fails, and calling
    /// execute again with the same `CreateSpec` creates another playlist.
    pub async fn execute(
        &self,
        caller: &UserId,
        request: &TransferRequest,
    ) -> Result<TransferResult> {
        let plan = self.plan(caller, request).await?;

        let (destination, created_destination, existing) = match &plan.destination {
            PlannedDestination::Existing(destination) => {
                let existing = plan.destination_ids(destination).await?;
                (destination.playlist.clone(), None, existing)
            }
            PlannedDestination::Create(spec) => {
                let mut created = plan.client.create_playlist(spec).await.map_err(|e| {
                    warn!(
                        caller = %caller,
                        title = %spec.title,
                        error = %e,
                        "Destination creation failed"
                    );
                    TransferError::DestinationCreate(e.to_string())
                })?;
                created.provider = plan.source.provider();
                info!(
                    caller = %caller,
                    provider_playlist_id = %created.provider_playlist_id,
                    title = %created.title,
                    "Created destination playlist"
                );
                let summary = created.summary();
                (created, Some(summary), HashSet::new())
            }
        };

        let (to_add, duplicates) = partition(&plan.matched, &existing);
        let max = self.limits.max_tracks_per_action;
        let truncated_count = to_add.len().saturating_sub(max);
        let to_add_ids: Vec<String> = to_add
            .into_iter()
            .take(max)
            .map(|track| track.provider_track_id)
            .collect();

        let (added_count, failed_items) = self
            .add_tracks(plan.client.as_ref(), &destination.provider_playlist_id, &to_add_ids)
            .await;

        let note = (truncated_count > 0).then(|| {
            format!(
                "Only the first {max} tracks were added; {truncated_count} more were left out. \
                 Run the transfer again to add them."
            )
        });

        let result = TransferResult {
            source_label: plan.source.label().to_string(),
            destination_label: destination.title.clone(),
            source: plan.source.summary(),
            destination: destination.summary(),
            created_destination,
            matched_count: plan.matched.len(),
            added_count,
            skipped_duplicate_count: duplicates.len(),
            failed_count: failed_items.len(),
            failed_items,
            truncated_count,
            note,
        };

        info!(
            caller = %caller,
            source = %plan.source.reference.key(),
            destination = %destination.provider_playlist_id,
            matched = result.matched_count,
            added = result.added_count,
            skipped = result.skipped_duplicate_count,
            failed = result.failed_count,
            truncated = result.truncated_count,
            "Transfer executed"
        );

        Ok(result)
    }

    /// Add ids in chunks, retrying a rejected chunk one id at a time
    async fn add_tracks(
        &self,
        client: &dyn MusicProvider,
        playlist_id: &str,
        track_ids: &[String],
    ) -> (usize, Vec<FailedItem>) {
        let mut added = 0;
        let mut failed = Vec::new();

        for chunk in track_ids.chunks(self.limits.add_chunk_size.max(1)) {
            let err = match client.add_tracks(playlist_id, chunk).await {
                Ok(()) => {
                    added += chunk.len();
                    continue;
                }
                Err(err) => err,
            };

            if let [track_id] = chunk {
                warn!(playlist_id, track_id = %track_id, error = %err, "Track add failed");
                failed.push(FailedItem {
                    provider_track_id: track_id.clone(),
                    error: err.to_string(),
                });
                continue;
            }

            warn!(
                playlist_id,
                chunk = chunk.len(),
                error = %err,
                "Chunk add failed, retrying tracks individually"
            );
            for track_id in chunk {
                match client.add_tracks(playlist_id, std::slice::from_ref(track_id)).await {
                    Ok(()) => added += 1,
                    Err(err) => {
                        warn!(playlist_id, track_id = %track_id, error = %err, "Track add failed");
                        failed.push(FailedItem {
                            provider_track_id: track_id.clone(),
                            error: err.to_string(),
                        });
                    }
                }
            }
        }

        (added, failed)
    }
}
