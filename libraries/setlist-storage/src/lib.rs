//! Setlist Storage
//!
//! `SQLite` playlist-ownership store for Setlist.
//!
//! An internal playlist records which user owns which provider playlist. Track
//! membership is never stored here; it always lives at the provider.
//!
//! # Example
//!
//! ```rust,no_run
//! use setlist_core::{PlaylistDirectory, UserId};
//! use setlist_storage::{create_pool, run_migrations, SqlitePlaylistDirectory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://setlist.db").await?;
//! run_migrations(&pool).await?;
//!
//! let directory = SqlitePlaylistDirectory::new(pool);
//! let mine = directory.list_owned(&UserId::new("user-1")).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod playlists;

pub use context::SqlitePlaylistDirectory;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://setlist.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
