//! Counterparty resolution: my playlists, search and pasted links

mod common;

use common::*;
use setlist_core::{CandidateOrigin, PlaylistRef, Provider, TransferError, UserId};
use setlist_transfer::SearchScope;

/// Anchor "anchor" plus two other account playlists and one public playlist
fn library(fx: &Fixture) -> i64 {
    fx.provider.add_playlist("anchor", "Anchor", tracks("a", 2));
    fx.provider.add_playlist("p1", "zebra crossing", Vec::new());
    fx.provider.add_playlist("p2", "Deep Cuts", Vec::new());
    fx.provider.add_public_playlist("pub", "Deep Public", Vec::new());

    let anchor = fx.directory.register(OWNER, Provider::Soundcloud, "anchor", "Anchor");
    fx.directory.register(OWNER, Provider::Soundcloud, "p2", "Deep Cuts (shared)");
    fx.directory.register(OWNER, Provider::Spotify, "sp", "Other provider");
    fx.directory.register("someone-else", Provider::Soundcloud, "x", "Deep Theirs");
    anchor.id
}

mod my_playlists {
    use super::*;

    #[tokio::test]
    async fn test_lists_provider_and_internal_without_anchor() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let candidates = fx.resolver.my_playlists(&fx.owner(), anchor).await.unwrap();

        let labels: Vec<&str> = candidates.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Deep Cuts", "Deep Cuts (shared)", "zebra crossing"]);
        assert_eq!(candidates[0].origin, CandidateOrigin::Provider);
        assert_eq!(candidates[0].key, "provider:soundcloud:p2");
        assert_eq!(candidates[1].origin, CandidateOrigin::Internal);
    }

    #[tokio::test]
    async fn test_anchor_must_be_owned() {
        let fx = Fixture::new();
        library(&fx);
        let theirs = fx.directory.register("someone-else", Provider::Soundcloud, "y", "Y");

        let err = fx.resolver.my_playlists(&fx.owner(), theirs.id).await.unwrap_err();
        assert!(matches!(err, TransferError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_missing_anchor_is_not_found() {
        let fx = Fixture::new();

        let err = fx.resolver.my_playlists(&fx.owner(), 99).await.unwrap_err();
        assert!(matches!(err, TransferError::NotFound(_)));
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn test_empty_query_finds_nothing() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let found = fx
            .resolver
            .search(&fx.owner(), anchor, "   ", SearchScope::Provider)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_provider_scope_excludes_anchor() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let found = fx
            .resolver
            .search(&fx.owner(), anchor, "an", SearchScope::Provider)
            .await
            .unwrap();
        assert!(found.iter().all(|c| c.key != "provider:soundcloud:anchor"));

        let deep = fx
            .resolver
            .search(&fx.owner(), anchor, "deep", SearchScope::Provider)
            .await
            .unwrap();
        let labels: Vec<&str> = deep.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Deep Cuts", "Deep Public"]);
    }

    #[tokio::test]
    async fn test_internal_scope_is_owner_and_provider_scoped() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let found = fx
            .resolver
            .search(&fx.owner(), anchor, "deep", SearchScope::Internal)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Deep Cuts (shared)");
        assert_eq!(found[0].origin, CandidateOrigin::Internal);

        let self_match = fx
            .resolver
            .search(&fx.owner(), anchor, "anchor", SearchScope::Internal)
            .await
            .unwrap();
        assert!(self_match.is_empty());
    }

    #[tokio::test]
    async fn test_link_query_is_resolved() {
        let fx = Fixture::new();
        let anchor = library(&fx);
        let url = fx.provider.playlist_url("pub");

        let found = fx
            .resolver
            .search(&fx.owner(), anchor, &url, SearchScope::Provider)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].reference, PlaylistRef::provider(Provider::Soundcloud, "pub"));
    }

    #[tokio::test]
    async fn test_browse_merges_without_duplicates() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let browsed = fx
            .resolver
            .browse(&fx.owner(), anchor, Some("deep"), SearchScope::Provider)
            .await
            .unwrap();

        let keys: Vec<&str> = browsed.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "provider:soundcloud:p2",
                "internal:2",
                "provider:soundcloud:pub",
            ]
        );
    }

    #[tokio::test]
    async fn test_foreign_caller_is_unauthorized() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let err = fx
            .resolver
            .search(&UserId::new("nobody"), anchor, "deep", SearchScope::Provider)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::Unauthorized(_)));
    }
}

mod links {
    use super::*;

    #[tokio::test]
    async fn test_resolves_bare_host_link() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let candidate = fx
            .resolver
            .resolve_link(&fx.owner(), anchor, "soundcloud.com/fake/sets/p1?si=abc")
            .await
            .unwrap();

        assert_eq!(candidate.label, "zebra crossing");
        assert_eq!(candidate.key, "provider:soundcloud:p1");
    }

    #[tokio::test]
    async fn test_other_provider_link_is_not_eligible() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        let err = fx
            .resolver
            .resolve_link(&fx.owner(), anchor, "https://open.spotify.com/playlist/abc")
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_anchor_link_is_not_eligible() {
        let fx = Fixture::new();
        let anchor = library(&fx);
        let url = fx.provider.playlist_url("anchor");

        let err = fx
            .resolver
            .resolve_link(&fx.owner(), anchor, &url)
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_links_are_invalid() {
        let fx = Fixture::new();
        let anchor = library(&fx);

        for link in [
            "https://soundcloud.com/fake/sets/nothing-here",
            "https://example.com/playlist/1",
        ] {
            let err = fx
                .resolver
                .resolve_link(&fx.owner(), anchor, link)
                .await
                .unwrap_err();
            assert!(matches!(err, TransferError::InvalidReference(_)), "{link}");
        }
    }
}
