//! Shared fixtures for transfer engine tests

#![allow(dead_code)]

use setlist_core::{PlaylistRef, Provider, Track, UserId};
use setlist_transfer::testing::{MemoryDirectory, MemoryProvider};
use setlist_transfer::{CounterpartyResolver, ProviderRegistry, TransferLimits, TransferService};
use std::sync::Arc;

pub const OWNER: &str = "owner-1";

/// A SoundCloud fake, a directory and both services wired to them
pub struct Fixture {
    pub provider: Arc<MemoryProvider>,
    pub directory: Arc<MemoryDirectory>,
    pub service: TransferService,
    pub resolver: CounterpartyResolver,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_limits(TransferLimits::default())
    }

    pub fn with_limits(limits: TransferLimits) -> Self {
        let provider = Arc::new(MemoryProvider::new(Provider::Soundcloud));
        let directory = Arc::new(MemoryDirectory::new());
        let registry = ProviderRegistry::new().with(provider.clone());

        Self {
            service: TransferService::new(registry.clone(), directory.clone(), limits),
            resolver: CounterpartyResolver::new(registry, directory.clone(), limits),
            provider,
            directory,
        }
    }

    pub fn owner(&self) -> UserId {
        UserId::new(OWNER)
    }
}

pub fn soundcloud(id: &str) -> PlaylistRef {
    PlaylistRef::provider(Provider::Soundcloud, id)
}

/// `count` tracks with ids `<prefix>1..=<prefix>count`
pub fn tracks(prefix: &str, count: usize) -> Vec<Track> {
    (1..=count)
        .map(|n| Track::new(format!("{prefix}{n}"), format!("Track {prefix}{n}")))
        .collect()
}

pub fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.provider_track_id.as_str()).collect()
}
