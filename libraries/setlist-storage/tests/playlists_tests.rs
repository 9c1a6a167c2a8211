//! Integration tests for the internal playlists slice
//!
//! Covers registration, ownership listing, title search and the
//! `PlaylistDirectory` implementation on top of them.


use setlist_core::{PlaylistDirectory, Provider, UserId};
use setlist_storage::{playlists, SqlitePlaylistDirectory, StorageError};
use test_helpers::*;

#[tokio::test]
async fn test_register_and_get_playlist() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let playlist =
        register_test_playlist(pool, "alice", Provider::Soundcloud, "1001", "Warehouse").await;

    assert_eq!(playlist.owner_user_id, UserId::new("alice"));
    assert_eq!(playlist.provider, Provider::Soundcloud);
    assert_eq!(playlist.provider_playlist_id, "1001");

    let fetched = playlists::get_by_id(pool, playlist.id)
        .await
        .expect("Query failed")
        .expect("Playlist not found");
    assert_eq!(fetched, playlist);
}

#[tokio::test]
async fn test_get_missing_playlist_returns_none() {
    let test_db = TestDb::new().await;

    let missing = playlists::get_by_id(test_db.pool(), 4242).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    register_test_playlist(pool, "alice", Provider::Spotify, "abc", "Mix").await;

    let result = playlists::register(
        pool,
        playlists::RegisterPlaylist {
            owner_user_id: UserId::new("alice"),
            provider: Provider::Spotify,
            provider_playlist_id: "abc".to_string(),
            title: "Mix again".to_string(),
            image_url: None,
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::Duplicate(_))));
}

#[tokio::test]
async fn test_list_by_owner_is_sorted_by_title() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    register_test_playlist(pool, "alice", Provider::Soundcloud, "1", "zebra").await;
    register_test_playlist(pool, "alice", Provider::Soundcloud, "2", "Alpha").await;
    register_test_playlist(pool, "bob", Provider::Soundcloud, "3", "Beta").await;

    let owned = playlists::list_by_owner(pool, &UserId::new("alice"))
        .await
        .unwrap();

    let titles: Vec<&str> = owned.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "zebra"]);
}

#[tokio::test]
async fn test_search_owned_is_case_insensitive_and_limited() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let bob = UserId::new("bob");

    register_test_playlist(pool, "alice", Provider::Soundcloud, "1", "Deep House Sunday").await;
    register_test_playlist(pool, "bob", Provider::Soundcloud, "2", "deep cuts").await;
    register_test_playlist(pool, "bob", Provider::Soundcloud, "3", "Deeper Still").await;
    register_test_playlist(pool, "bob", Provider::Soundcloud, "4", "Techno").await;

    let found = playlists::search_owned(pool, &bob, "DEEP", 10).await.unwrap();
    let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["deep cuts", "Deeper Still"]);

    let limited = playlists::search_owned(pool, &bob, "deep", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].title, "deep cuts");

    let empty = playlists::search_owned(pool, &bob, "   ", 10).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    register_test_playlist(pool, "alice", Provider::Soundcloud, "1", "100% Vinyl").await;
    register_test_playlist(pool, "alice", Provider::Soundcloud, "2", "1000 Songs").await;

    let found = playlists::search_owned(pool, &UserId::new("alice"), "100%", 10)
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Vinyl");
}

#[tokio::test]
async fn test_search_folds_non_ascii_titles() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = UserId::new("alice");

    register_test_playlist(pool, "alice", Provider::Soundcloud, "1", "Übermix").await;
    register_test_playlist(pool, "alice", Provider::Soundcloud, "2", "ÉTÉ À PARIS").await;

    for query in ["übermix", "Übermix", "ÜBER"] {
        let found = playlists::search_owned(pool, &alice, query, 10).await.unwrap();
        let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Übermix"], "query {query}");
    }

    let found = playlists::search_owned(pool, &alice, "été", 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].provider_playlist_id, "2");
}

#[tokio::test]
async fn test_directory_trait_delegates_to_slice() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created =
        register_test_playlist(pool, "carol", Provider::Spotify, "xyz", "Road Trip").await;

    let directory = SqlitePlaylistDirectory::new(pool.clone());

    let fetched = directory.get_playlist(created.id).await.unwrap();
    assert_eq!(fetched.as_ref().map(|p| p.id), Some(created.id));

    let owned = directory.list_owned(&UserId::new("carol")).await.unwrap();
    assert_eq!(owned.len(), 1);

    let found = directory
        .search_owned(&UserId::new("carol"), "road", 5)
        .await
        .unwrap();
    assert_eq!(found[0].provider_playlist_id, "xyz");
}
