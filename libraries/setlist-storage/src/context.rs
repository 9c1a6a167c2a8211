use crate::playlists;
use async_trait::async_trait;
use setlist_core::{
    error::Result, InternalPlaylist, InternalPlaylistId, PlaylistDirectory, UserId,
};
use sqlx::SqlitePool;

/// `PlaylistDirectory` backed by `SQLite`
#[derive(Clone)]
pub struct SqlitePlaylistDirectory {
    pool: SqlitePool,
}

impl SqlitePlaylistDirectory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaylistDirectory for SqlitePlaylistDirectory {
    async fn get_playlist(&self, id: InternalPlaylistId) -> Result<Option<InternalPlaylist>> {
        Ok(playlists::get_by_id(&self.pool, id).await?)
    }

    async fn list_owned(&self, owner: &UserId) -> Result<Vec<InternalPlaylist>> {
        Ok(playlists::list_by_owner(&self.pool, owner).await?)
    }

    async fn search_owned(
        &self,
        owner: &UserId,
        query: &str,
        limit: usize,
    ) -> Result<Vec<InternalPlaylist>> {
        Ok(playlists::search_owned(&self.pool, owner, query, limit).await?)
    }
}
