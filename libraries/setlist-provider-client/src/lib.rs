//! Setlist Provider Client
//!
//! HTTP client for a music provider gateway. The gateway fronts one external
//! music service (SoundCloud, Spotify) behind a small JSON API; this crate
//! adapts it to `setlist_core::MusicProvider`.
//!
//! # Example
//!
//! ```ignore
//! use setlist_core::{MusicProvider, Provider};
//! use setlist_provider_client::{GatewayConfig, GatewayProvider};
//!
//! let config = GatewayConfig::new(Provider::Spotify, "https://gateway.example.com/spotify")
//!     .with_access_token("token");
//! let client = GatewayProvider::new(config)?;
//!
//! let playlists = client.list_playlists().await?;
//! println!("Found {} playlists", playlists.len());
//! ```

mod client;
mod error;
mod types;

pub use client::GatewayProvider;
pub use error::{ProviderClientError, Result};
pub use types::GatewayConfig;
