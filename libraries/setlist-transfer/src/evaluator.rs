//! Selection Criteria Evaluator
//!
//! Pure functions over a source's current track list. Preview and execute
//! both call [`match_tracks`] so they can never disagree on what matched.

use setlist_core::{fold_value, SelectionMode, Track};
use std::collections::{HashMap, HashSet};

/// Tracks of `source` selected by `mode` and its sanitized `values`.
///
/// - `all` keeps every track in source order.
/// - `genre`/`artist` keep tracks whose folded field equals one of the
///   (already folded) values. Missing fields never match.
/// - `songs` follows the order of `values`; ids absent from the source are
///   dropped silently.
///
/// The result never holds two tracks with the same id, and tracks with an
/// empty id are discarded.
pub fn match_tracks(source: &[Track], mode: SelectionMode, values: &[String]) -> Vec<Track> {
    let tracks = dedupe_by_id(source);

    match mode {
        SelectionMode::All => tracks,
        SelectionMode::Genre => filter_field(tracks, values, |track| track.genre.as_deref()),
        SelectionMode::Artist => filter_field(tracks, values, |track| track.artist.as_deref()),
        SelectionMode::Songs => pick_songs(tracks, values),
    }
}

/// Source tracks with duplicate and empty ids removed, first occurrence wins.
pub fn dedupe_by_id(tracks: &[Track]) -> Vec<Track> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .filter(|track| {
            !track.provider_track_id.is_empty() && seen.insert(track.provider_track_id.as_str())
        })
        .cloned()
        .collect()
}

fn filter_field<F>(tracks: Vec<Track>, values: &[String], field: F) -> Vec<Track>
where
    F: Fn(&Track) -> Option<&str>,
{
    let wanted: HashSet<&str> = values.iter().map(String::as_str).collect();
    tracks
        .into_iter()
        .filter(|track| {
            field(track).is_some_and(|value| wanted.contains(fold_value(value).as_str()))
        })
        .collect()
}

fn pick_songs(tracks: Vec<Track>, values: &[String]) -> Vec<Track> {
    let mut by_id: HashMap<String, Track> = tracks
        .into_iter()
        .map(|track| (track.provider_track_id.clone(), track))
        .collect();

    // `remove` also guards against an id listed twice
    values.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Vec<Track> {
        vec![
            Track::new("a", "Alpha").with_genre("House").with_artist("Dana"),
            Track::new("b", "Beta").with_genre("Techno").with_artist("Eli"),
            Track::new("c", "Gamma").with_artist("dana "),
            Track::new("a", "Alpha (dup)").with_genre("House"),
            Track::new("", "No id").with_genre("House"),
        ]
    }

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.provider_track_id.as_str()).collect()
    }

    #[test]
    fn all_keeps_source_order_without_duplicates() {
        let matched = match_tracks(&source(), SelectionMode::All, &[]);
        assert_eq!(ids(&matched), vec!["a", "b", "c"]);
        assert_eq!(matched[0].title, "Alpha");
    }

    #[test]
    fn genre_match_is_case_insensitive_and_exact() {
        let matched = match_tracks(&source(), SelectionMode::Genre, &["house".into()]);
        assert_eq!(ids(&matched), vec!["a"]);

        let partial = match_tracks(&source(), SelectionMode::Genre, &["hou".into()]);
        assert!(partial.is_empty());
    }

    #[test]
    fn artist_match_trims_track_values() {
        let matched = match_tracks(&source(), SelectionMode::Artist, &["dana".into()]);
        assert_eq!(ids(&matched), vec!["a", "c"]);
    }

    #[test]
    fn missing_field_never_matches() {
        let matched = match_tracks(&source(), SelectionMode::Genre, &["techno".into(), "".into()]);
        assert_eq!(ids(&matched), vec!["b"]);
    }

    #[test]
    fn songs_follow_caller_order_and_skip_missing_ids() {
        let values = vec!["c".to_string(), "missing".to_string(), "a".to_string(), "c".to_string()];
        let matched = match_tracks(&source(), SelectionMode::Songs, &values);
        assert_eq!(ids(&matched), vec!["c", "a"]);
    }

    #[test]
    fn empty_source_matches_nothing() {
        assert!(match_tracks(&[], SelectionMode::All, &[]).is_empty());
    }
}
