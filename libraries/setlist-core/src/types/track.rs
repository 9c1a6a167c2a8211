/// Track domain type and provider namespace
use serde::{Deserialize, Serialize};
use std::fmt;

/// External music service hosting playlists and tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Soundcloud,
    Spotify,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Soundcloud => "soundcloud",
            Provider::Spotify => "spotify",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "soundcloud" => Some(Provider::Soundcloud),
            "spotify" => Some(Provider::Spotify),
            _ => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A track as reported by a provider.
///
/// Identity is `provider_track_id` within one provider namespace. The other
/// fields are display data; only `genre` and `artist` take part in selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub provider_track_id: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Track {
    pub fn new(provider_track_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            provider_track_id: provider_track_id.into(),
            title: title.into(),
            artist: None,
            genre: None,
            artwork_url: None,
            url: None,
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Whether the title, artist or genre contains an already case-folded needle
    pub fn contains_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [Some(&self.title), self.artist.as_ref(), self.genre.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parse_is_case_insensitive() {
        assert_eq!(Provider::parse(" SoundCloud "), Some(Provider::Soundcloud));
        assert_eq!(Provider::parse("spotify"), Some(Provider::Spotify));
        assert_eq!(Provider::parse("tidal"), None);
    }

    #[test]
    fn contains_text_searches_title_artist_and_genre() {
        let track = Track::new("t1", "Midnight Drive")
            .with_artist("DJ Seinfeld")
            .with_genre("Lo-Fi House");

        assert!(track.contains_text("midnight"));
        assert!(track.contains_text("seinfeld"));
        assert!(track.contains_text("lo-fi"));
        assert!(track.contains_text(""));
        assert!(!track.contains_text("techno"));
    }
}
