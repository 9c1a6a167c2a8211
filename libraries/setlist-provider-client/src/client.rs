//! Provider gateway client.

use crate::error::{ProviderClientError, Result};
use crate::types::{
    AddTracksRequest, CreatePlaylistRequest, ErrorBody, GatewayConfig, WirePlaylist, WireTrack,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use setlist_core::{
    CreateSpec, MusicProvider, Provider, ProviderError, ProviderPlaylist, ProviderResult, Track,
};
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

const MAX_ERROR_BODY_CHARS: usize = 600;

/// `MusicProvider` backed by a provider gateway over HTTP.
///
/// Gateway endpoints, relative to the base URL:
///
/// | operation | request |
/// |---|---|
/// | own playlists | `GET me/playlists` |
/// | playlist | `GET playlists/{id}` |
/// | search | `GET search/playlists?q=&limit=` |
/// | resolve link | `GET resolve?url=` |
/// | create | `POST playlists` |
/// | tracks | `GET playlists/{id}/tracks` |
/// | add tracks | `POST playlists/{id}/tracks` |
pub struct GatewayProvider {
    http: Client,
    base_url: Url,
    config: GatewayConfig,
}

impl GatewayProvider {
    /// Create a new client with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ProviderClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let raw = config.base_url.trim().trim_end_matches('/');
        if !raw.starts_with("http://") && !raw.starts_with("https://") {
            return Err(ProviderClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url =
            Url::parse(raw).map_err(|e| ProviderClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Setlist/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProviderClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ProviderClientError::Unreachable(e.to_string())
            } else {
                ProviderClientError::Request(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::message)
            .unwrap_or_else(|| truncate(&body));

        if matches!(status.as_u16(), 401 | 403) {
            warn!(
                provider = %self.config.provider,
                status = status.as_u16(),
                path = %path,
                message = %message,
                "Provider gateway auth error"
            );
        } else {
            error!(
                provider = %self.config.provider,
                status = status.as_u16(),
                path = %path,
                message = %message,
                "Provider gateway error"
            );
        }

        Err(ProviderClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "Gateway GET");
        let response = self.send(self.http.get(url)).await?;
        response
            .json()
            .await
            .map_err(|e| ProviderClientError::ParseError(e.to_string()))
    }

    fn playlist(&self, wire: WirePlaylist) -> ProviderPlaylist {
        wire.into_playlist(self.config.provider)
    }

    fn playlists(&self, wire: Vec<WirePlaylist>) -> Vec<ProviderPlaylist> {
        wire.into_iter().map(|p| self.playlist(p)).collect()
    }
}

#[async_trait]
impl MusicProvider for GatewayProvider {
    fn provider(&self) -> Provider {
        self.config.provider
    }

    async fn list_playlists(&self) -> ProviderResult<Vec<ProviderPlaylist>> {
        let url = self.endpoint(&["me", "playlists"])?;
        let wire: Vec<WirePlaylist> = self.get_json(url).await?;
        Ok(self.playlists(wire))
    }

    async fn get_playlist(&self, provider_playlist_id: &str) -> ProviderResult<ProviderPlaylist> {
        let url = self.endpoint(&["playlists", provider_playlist_id])?;
        let wire: WirePlaylist = self.get_json(url).await?;
        Ok(self.playlist(wire))
    }

    async fn search_playlists(
        &self,
        query: &str,
        limit: usize,
    ) -> ProviderResult<Vec<ProviderPlaylist>> {
        let mut url = self.endpoint(&["search", "playlists"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &limit.to_string());
        let wire: Vec<WirePlaylist> = self.get_json(url).await?;
        Ok(self.playlists(wire))
    }

    async fn resolve_playlist_url(&self, playlist_url: &str) -> ProviderResult<ProviderPlaylist> {
        if playlist_url.trim().is_empty() {
            return Err(ProviderError::api_status(400, "Playlist URL is required"));
        }
        let mut url = self.endpoint(&["resolve"])?;
        url.query_pairs_mut().append_pair("url", playlist_url);
        let wire: WirePlaylist = self.get_json(url).await?;
        Ok(self.playlist(wire))
    }

    async fn create_playlist(&self, spec: &CreateSpec) -> ProviderResult<ProviderPlaylist> {
        let url = self.endpoint(&["playlists"])?;
        debug!(url = %url, title = %spec.title, "Gateway create playlist");
        let response = self
            .send(self.http.post(url).json(&CreatePlaylistRequest::from(spec)))
            .await?;
        let mut wire: WirePlaylist = response
            .json()
            .await
            .map_err(|e| ProviderClientError::ParseError(e.to_string()))?;
        if wire.title.is_none() {
            wire.title = Some(spec.title.clone());
        }
        Ok(self.playlist(wire))
    }

    async fn list_tracks(&self, provider_playlist_id: &str) -> ProviderResult<Vec<Track>> {
        let url = self.endpoint(&["playlists", provider_playlist_id, "tracks"])?;
        let wire: Vec<WireTrack> = self.get_json(url).await?;
        Ok(wire.into_iter().map(Track::from).collect())
    }

    async fn add_tracks(
        &self,
        provider_playlist_id: &str,
        track_ids: &[String],
    ) -> ProviderResult<()> {
        if track_ids.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(&["playlists", provider_playlist_id, "tracks"])?;
        debug!(url = %url, count = track_ids.len(), "Gateway add tracks");
        self.send(self.http.post(url).json(&AddTracksRequest { track_ids }))
            .await?;
        Ok(())
    }
}

fn truncate(body: &str) -> String {
    let text = body.trim().replace('\n', " ");
    if text.chars().count() <= MAX_ERROR_BODY_CHARS {
        text
    } else {
        let cut: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_encoded_segments() {
        let client = GatewayProvider::new(GatewayConfig::new(
            Provider::Soundcloud,
            "https://gateway.example.com/soundcloud/",
        ))
        .unwrap();

        let url = client.endpoint(&["playlists", "a/b c", "tracks"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://gateway.example.com/soundcloud/playlists/a%2Fb%20c/tracks"
        );
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS + 10);
        let truncated = truncate(&body);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 3);
    }
}
