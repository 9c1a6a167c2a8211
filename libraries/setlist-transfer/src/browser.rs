//! Paged Source Browser and facet listing

use serde::{Deserialize, Serialize};
use setlist_core::{
    fold_value, FacetValue, PlaylistRef, Result, SourceFacets, SourceTracksPage, Track,
    TransferError, UserId,
};
use std::collections::HashMap;
use tracing::debug;

use crate::endpoints::{self, Side};
use crate::evaluator;
use crate::service::TransferService;

pub const DEFAULT_PAGE_LIMIT: usize = 50;
pub const MAX_PAGE_LIMIT: usize = 100;

/// Page request over a source's tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTracksQuery {
    pub source: PlaylistRef,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl SourceTracksQuery {
    pub fn new(source: PlaylistRef) -> Self {
        Self {
            source,
            search: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl TransferService {
    /// One page of a source's tracks, optionally narrowed by a text search.
    ///
    /// `total_count` counts the tracks matching the search, not the page.
    /// An offset past the end yields an empty page.
    pub async fn list_source_tracks(
        &self,
        caller: &UserId,
        query: &SourceTracksQuery,
    ) -> Result<SourceTracksPage> {
        if !(1..=MAX_PAGE_LIMIT).contains(&query.limit) {
            return Err(TransferError::invalid_request(format!(
                "limit must be between 1 and {MAX_PAGE_LIMIT}"
            )));
        }

        let tracks = self.source_tracks(caller, &query.source).await?;
        let needle = query.search.as_deref().map(fold_value).unwrap_or_default();
        let filtered: Vec<Track> = tracks
            .into_iter()
            .filter(|track| track.contains_text(&needle))
            .collect();
        let total_count = filtered.len();
        let page: Vec<Track> = filtered
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();

        debug!(
            source = %query.source.key(),
            search = %needle,
            total = total_count,
            returned = page.len(),
            "Listed source tracks"
        );

        Ok(SourceTracksPage {
            tracks: page,
            total_count,
            limit: query.limit,
            offset: query.offset,
        })
    }

    /// Distinct genres and artists of a source with their track counts
    pub async fn list_facets(&self, caller: &UserId, source: &PlaylistRef) -> Result<SourceFacets> {
        let tracks = self.source_tracks(caller, source).await?;
        Ok(SourceFacets {
            genres: facet_values(tracks.iter().filter_map(|t| t.genre.as_deref())),
            artists: facet_values(tracks.iter().filter_map(|t| t.artist.as_deref())),
        })
    }

    /// Deduplicated current tracks of a caller-accessible source
    async fn source_tracks(&self, caller: &UserId, source: &PlaylistRef) -> Result<Vec<Track>> {
        let resolved = endpoints::resolve(
            &self.providers,
            self.directory.as_ref(),
            caller,
            source,
            Side::Source,
        )
        .await?;
        let client = self.providers.get(resolved.provider())?;
        let tracks = endpoints::read_tracks(client.as_ref(), &resolved, Side::Source).await?;
        Ok(evaluator::dedupe_by_id(&tracks))
    }
}

/// Group values case-insensitively, keeping the first spelling seen.
///
/// Sorted by count descending, then value ascending.
fn facet_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<FacetValue> {
    let mut facets: Vec<FacetValue> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for value in values {
        let key = fold_value(value);
        if key.is_empty() {
            continue;
        }
        match index.get(&key) {
            Some(&i) => facets[i].count += 1,
            None => {
                index.insert(key, facets.len());
                facets.push(FacetValue {
                    value: value.trim().to_string(),
                    count: 1,
                });
            }
        }
    }

    facets.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| fold_value(&a.value).cmp(&fold_value(&b.value)))
    });
    facets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facets_group_case_insensitively_and_sort_by_count() {
        let facets = facet_values(
            ["House", "techno", "house ", "Ambient", "TECHNO", "house", "  "].into_iter(),
        );
        let pairs: Vec<(&str, usize)> =
            facets.iter().map(|f| (f.value.as_str(), f.count)).collect();
        assert_eq!(pairs, vec![("House", 3), ("techno", 2), ("Ambient", 1)]);
    }

    #[test]
    fn query_defaults_apply_when_deserializing() {
        let query: SourceTracksQuery = serde_json::from_str(
            r#"{"source": {"kind": "internal", "internal_playlist_id": 3}}"#,
        )
        .unwrap();
        assert_eq!(query.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(query.offset, 0);
        assert!(query.search.is_none());
    }
}
