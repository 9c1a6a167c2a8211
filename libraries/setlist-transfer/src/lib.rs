//! Setlist transfer engine
//!
//! Copies a selected subset of tracks from a source playlist into a
//! destination playlist (existing, or created on the fly) with a two-phase
//! preview/execute protocol.
//!
//! - [`evaluator`] selects source tracks by criteria
//! - [`TransferService`] previews and executes transfers, and pages a
//!   source's tracks and facets for manual picking
//! - [`CounterpartyResolver`] offers candidate playlists from the caller's
//!   own playlists, a search, or a pasted link
//!
//! # Example
//!
//! ```ignore
//! use setlist_core::{DestinationSpec, PlaylistRef, SelectionCriteria, TransferRequest};
//! use setlist_transfer::{ProviderRegistry, TransferLimits, TransferService};
//!
//! let service = TransferService::new(registry, directory, TransferLimits::default());
//! let request = TransferRequest::new(
//!     PlaylistRef::internal(1),
//!     DestinationSpec::Existing(PlaylistRef::internal(2)),
//!     SelectionCriteria::all(),
//! );
//!
//! let summary = service.preview(&caller, &request).await?;
//! if !summary.capacity_exceeded {
//!     let result = service.execute(&caller, &request).await?;
//!     println!("added {} tracks", result.added_count);
//! }
//! ```

#![forbid(unsafe_code)]

mod browser;
mod counterparty;
mod endpoints;
pub mod evaluator;
mod limits;
mod registry;
mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use browser::{SourceTracksQuery, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use counterparty::{merge_candidates, CounterpartyResolver, SearchScope};
pub use limits::TransferLimits;
pub use registry::ProviderRegistry;
pub use service::TransferService;
