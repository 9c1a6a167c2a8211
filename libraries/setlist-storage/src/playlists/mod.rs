use crate::error::{Result, StorageError};
use chrono::{DateTime, Utc};
use setlist_core::{fold_value, InternalPlaylist, InternalPlaylistId, Provider, UserId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Data for registering a provider playlist as an internal playlist
#[derive(Debug, Clone)]
pub struct RegisterPlaylist {
    pub owner_user_id: UserId,
    pub provider: Provider,
    pub provider_playlist_id: String,
    pub title: String,
    pub image_url: Option<String>,
}

const COLUMNS: &str =
    "id, owner_user_id, provider, provider_playlist_id, title, image_url, created_at";

fn from_row(row: &SqliteRow) -> Result<InternalPlaylist> {
    let provider_raw: String = row.try_get("provider")?;
    let provider = Provider::parse(&provider_raw)
        .ok_or_else(|| StorageError::CorruptRow(format!("unknown provider '{provider_raw}'")))?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(InternalPlaylist {
        id: row.try_get("id")?,
        owner_user_id: UserId::new(row.try_get::<String, _>("owner_user_id")?),
        provider,
        provider_playlist_id: row.try_get("provider_playlist_id")?,
        title: row.try_get("title")?,
        image_url: row.try_get("image_url")?,
        created_at,
    })
}

/// Get internal playlist by ID
pub async fn get_by_id(
    pool: &SqlitePool,
    id: InternalPlaylistId,
) -> Result<Option<InternalPlaylist>> {
    let row = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM internal_playlists WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Get playlists owned by a user, ordered by title
pub async fn list_by_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<InternalPlaylist>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM internal_playlists
         WHERE owner_user_id = ?
         ORDER BY title COLLATE NOCASE, id"
    ))
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(from_row).collect()
}

/// Case-insensitive substring search over the titles of one owner's playlists.
///
/// Titles are folded in Rust; SQLite's `LOWER` only folds ASCII.
pub async fn search_owned(
    pool: &SqlitePool,
    owner: &UserId,
    query: &str,
    limit: usize,
) -> Result<Vec<InternalPlaylist>> {
    let needle = fold_value(query);
    if needle.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    Ok(list_by_owner(pool, owner)
        .await?
        .into_iter()
        .filter(|playlist| fold_value(&playlist.title).contains(&needle))
        .take(limit)
        .collect())
}

/// Register a provider playlist for an owner
pub async fn register(pool: &SqlitePool, playlist: RegisterPlaylist) -> Result<InternalPlaylist> {
    let result = sqlx::query(
        r"
        INSERT INTO internal_playlists
            (owner_user_id, provider, provider_playlist_id, title, image_url)
        VALUES (?, ?, ?, ?, ?)
        ",
    )
    .bind(playlist.owner_user_id.as_str())
    .bind(playlist.provider.as_str())
    .bind(&playlist.provider_playlist_id)
    .bind(&playlist.title)
    .bind(&playlist.image_url)
    .execute(pool)
    .await
    .map_err(|err| match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Duplicate(format!(
            "{}:{} already registered for {}",
            playlist.provider, playlist.provider_playlist_id, playlist.owner_user_id
        )),
        other => StorageError::Database(other),
    })?;

    let id = result.last_insert_rowid();
    tracing::debug!(id, owner = %playlist.owner_user_id, "Registered internal playlist");

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("internal playlist", id.to_string()))
}
