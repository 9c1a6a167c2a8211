//! Pasted playlist link normalization
//!
//! Turns user input into a fully-qualified playlist URL following each
//! provider's path convention:
//!
//! - SoundCloud: `https://soundcloud.com/<user>/sets/<slug>`
//! - Spotify: `https://open.spotify.com/playlist/<id>` (also `spotify:playlist:<id>`)

use crate::error::{Result, TransferError};
use crate::types::Provider;
use url::Url;

const SOUNDCLOUD_HOSTS: [&str; 3] = ["soundcloud.com", "www.soundcloud.com", "m.soundcloud.com"];
const SPOTIFY_HOST: &str = "open.spotify.com";
const SPOTIFY_URI_PREFIX: &str = "spotify:playlist:";

/// A recognized playlist link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistLink {
    pub provider: Provider,
    /// Canonical URL, without query string or fragment
    pub url: String,
    /// Playlist id when the link shape carries one (Spotify)
    pub provider_playlist_id: Option<String>,
}

/// Whether the input looks like a link rather than a search query
pub fn looks_like_link(input: &str) -> bool {
    let lowered = input.trim().to_lowercase();
    lowered.starts_with("http://")
        || lowered.starts_with("https://")
        || lowered.starts_with(SPOTIFY_URI_PREFIX)
        || SOUNDCLOUD_HOSTS
            .iter()
            .chain(std::iter::once(&SPOTIFY_HOST))
            .any(|host| lowered.starts_with(&format!("{host}/")))
}

/// Normalize a pasted playlist link.
///
/// Unrecognized shapes fail with `TransferError::InvalidReference`.
pub fn normalize_playlist_link(input: &str) -> Result<PlaylistLink> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TransferError::invalid_reference("playlist link is empty"));
    }

    let lowered = trimmed.to_lowercase();
    if lowered.starts_with(SPOTIFY_URI_PREFIX) {
        return spotify_link(&trimmed[SPOTIFY_URI_PREFIX.len()..], trimmed);
    }

    let qualified = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else if looks_like_link(trimmed) {
        format!("https://{trimmed}")
    } else {
        return Err(unrecognized(trimmed));
    };

    let parsed = Url::parse(&qualified).map_err(|_| unrecognized(trimmed))?;
    let host = parsed.host_str().unwrap_or_default();
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if SOUNDCLOUD_HOSTS.contains(&host) {
        return match segments.as_slice() {
            [user, "sets", slug, ..] => Ok(PlaylistLink {
                provider: Provider::Soundcloud,
                url: format!("https://soundcloud.com/{user}/sets/{slug}"),
                provider_playlist_id: None,
            }),
            _ => Err(unrecognized(trimmed)),
        };
    }

    if host == SPOTIFY_HOST {
        let id = match segments.as_slice() {
            ["playlist", id, ..] => *id,
            [locale, "playlist", id, ..] if locale.starts_with("intl-") => *id,
            _ => return Err(unrecognized(trimmed)),
        };
        return spotify_link(id, trimmed);
    }

    Err(unrecognized(trimmed))
}

fn spotify_link(id: &str, original: &str) -> Result<PlaylistLink> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(unrecognized(original));
    }
    Ok(PlaylistLink {
        provider: Provider::Spotify,
        url: format!("https://open.spotify.com/playlist/{id}"),
        provider_playlist_id: Some(id.to_string()),
    })
}

fn unrecognized(input: &str) -> TransferError {
    TransferError::invalid_reference(format!("unrecognized playlist link: {input}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soundcloud_link_without_scheme_is_qualified() {
        let link = normalize_playlist_link("soundcloud.com/dj-seinfeld/sets/summer-mix").unwrap();
        assert_eq!(link.provider, Provider::Soundcloud);
        assert_eq!(link.url, "https://soundcloud.com/dj-seinfeld/sets/summer-mix");
        assert_eq!(link.provider_playlist_id, None);
    }

    #[test]
    fn soundcloud_mobile_host_and_query_are_canonicalized() {
        let link =
            normalize_playlist_link("https://m.soundcloud.com/artist/sets/late-night/?si=abc#x")
                .unwrap();
        assert_eq!(link.url, "https://soundcloud.com/artist/sets/late-night");
    }

    #[test]
    fn soundcloud_track_link_is_rejected() {
        let err = normalize_playlist_link("https://soundcloud.com/artist/some-track").unwrap_err();
        assert!(matches!(err, TransferError::InvalidReference(_)));
    }

    #[test]
    fn spotify_url_forms_yield_playlist_id() {
        for input in [
            "https://open.spotify.com/playlist/37i9dQZF1DX4dyzvuaRJ0n?si=123",
            "open.spotify.com/playlist/37i9dQZF1DX4dyzvuaRJ0n",
            "https://open.spotify.com/intl-de/playlist/37i9dQZF1DX4dyzvuaRJ0n",
            "spotify:playlist:37i9dQZF1DX4dyzvuaRJ0n",
        ] {
            let link = normalize_playlist_link(input).unwrap();
            assert_eq!(link.provider, Provider::Spotify, "{input}");
            assert_eq!(
                link.url,
                "https://open.spotify.com/playlist/37i9dQZF1DX4dyzvuaRJ0n"
            );
            assert_eq!(
                link.provider_playlist_id.as_deref(),
                Some("37i9dQZF1DX4dyzvuaRJ0n")
            );
        }
    }

    #[test]
    fn spotify_album_link_is_rejected() {
        assert!(normalize_playlist_link("https://open.spotify.com/album/abc").is_err());
    }

    #[test]
    fn unknown_hosts_and_free_text_are_rejected() {
        assert!(normalize_playlist_link("https://example.com/playlist/1").is_err());
        assert!(normalize_playlist_link("deep house").is_err());
        assert!(normalize_playlist_link("   ").is_err());
    }

    #[test]
    fn looks_like_link_distinguishes_queries() {
        assert!(looks_like_link("soundcloud.com/a/sets/b"));
        assert!(looks_like_link("HTTPS://example.com"));
        assert!(!looks_like_link("soundcloud favourites"));
    }
}
