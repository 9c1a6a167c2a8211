/// Transfer request and outcome types shared by preview and execute
use crate::types::{
    DestinationSpec, PlaylistRef, PlaylistSummary, SelectionCriteria, SelectionMode, Track,
};
use serde::{Deserialize, Serialize};

/// Identical shape for preview and execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub source: PlaylistRef,
    pub destination: DestinationSpec,
    #[serde(default)]
    pub criteria: SelectionCriteria,
}

impl TransferRequest {
    pub fn new(
        source: PlaylistRef,
        destination: DestinationSpec,
        criteria: SelectionCriteria,
    ) -> Self {
        Self {
            source,
            destination,
            criteria,
        }
    }
}

/// Read-only simulation of a transfer.
///
/// `matched_count == to_add_count + duplicate_count` always holds. Counts are
/// never capped; `capacity_exceeded` flags that execute will truncate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSummary {
    pub source_label: String,
    pub destination_label: String,
    pub source: PlaylistSummary,
    /// `None` when the destination will be created by execute
    pub destination: Option<PlaylistSummary>,
    pub selection_mode: SelectionMode,
    pub selection_values: Vec<String>,
    pub matched_count: usize,
    pub to_add_count: usize,
    pub duplicate_count: usize,
    pub max_tracks_per_action: usize,
    pub capacity_exceeded: bool,
    pub matched_sample: Vec<Track>,
    pub duplicate_sample: Vec<Track>,
}

/// A track that could not be added during execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedItem {
    pub provider_track_id: String,
    pub error: String,
}

/// Outcome of a mutating transfer.
///
/// `matched_count == added_count + skipped_duplicate_count + failed_count + truncated_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    pub source_label: String,
    pub destination_label: String,
    pub source: PlaylistSummary,
    pub destination: PlaylistSummary,
    /// Set only when this call created the destination
    pub created_destination: Option<PlaylistSummary>,
    pub matched_count: usize,
    pub added_count: usize,
    pub skipped_duplicate_count: usize,
    pub failed_count: usize,
    pub failed_items: Vec<FailedItem>,
    /// Tracks left out because of `max_tracks_per_action`
    pub truncated_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One page of a source playlist's tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTracksPage {
    pub tracks: Vec<Track>,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
}

/// A distinct genre or artist value with the number of tracks carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Distinct genre and artist values of a source, for criteria pickers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceFacets {
    pub genres: Vec<FacetValue>,
    pub artists: Vec<FacetValue>,
}
