mod counterparty;
mod ids;
mod playlist;
mod selection;
mod track;
mod transfer;

pub use counterparty::{CandidateOrigin, CounterpartyCandidate};
pub use ids::{InternalPlaylistId, UserId};
pub use playlist::{
    CreateSpec, DestinationSpec, InternalPlaylist, PlaylistRef, PlaylistSummary, ProviderPlaylist,
};
pub use selection::{fold_value, SelectionCriteria, SelectionMode};
pub use track::{Provider, Track};
pub use transfer::{
    FacetValue, FailedItem, SourceFacets, SourceTracksPage, TransferRequest, TransferResult,
    TransferSummary,
};
