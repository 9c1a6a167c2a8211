//! Setlist Core
//!
//! Shared vocabulary for the playlist track transfer engine.
//!
//! This crate has no I/O of its own. It defines:
//! - **Identity model**: `Track`, `PlaylistRef`, `DestinationSpec`, `Provider`
//! - **Transfer contract**: `TransferRequest`, `TransferSummary`, `TransferResult`
//! - **Collaborator traits**: `MusicProvider` (external music service) and
//!   `PlaylistDirectory` (internal playlist-ownership store)
//! - **Error handling**: `TransferError` for fatal failures, `ProviderError` for the
//!   provider boundary
//!
//! # Example
//!
//! ```rust
//! use setlist_core::types::{PlaylistRef, Provider, SelectionCriteria, SelectionMode};
//!
//! let source = PlaylistRef::provider(Provider::Spotify, "37i9dQZF1DXcBWIGoYBM5M");
//! let criteria = SelectionCriteria::new(SelectionMode::Genre, ["House", "techno"]);
//!
//! assert_eq!(source.key(), "provider:spotify:37i9dQZF1DXcBWIGoYBM5M");
//! assert_eq!(criteria.sanitized_values().unwrap(), vec!["house", "techno"]);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod link;
pub mod traits;
pub mod types;

pub use error::{ProviderError, ProviderResult, Result, TransferError};
pub use link::{looks_like_link, normalize_playlist_link, PlaylistLink};
pub use traits::{MusicProvider, PlaylistDirectory};

pub use types::{
    fold_value, CandidateOrigin, CounterpartyCandidate, CreateSpec, DestinationSpec, FacetValue,
    FailedItem, InternalPlaylist, InternalPlaylistId, PlaylistRef, PlaylistSummary, Provider,
    ProviderPlaylist, SelectionCriteria, SelectionMode, SourceFacets, SourceTracksPage, Track,
    TransferRequest, TransferResult, TransferSummary, UserId,
};
