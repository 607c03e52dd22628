use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::AppConfig;
use crate::error::{StorageError, StorageResult};

/// Process-wide handles to both stores.
///
/// Opened once at startup and released with [`Stores::close`] after the
/// server has drained.
#[derive(Clone)]
pub struct Stores {
    pub movies: SqlitePool,
    pub ratings: SqlitePool,
}

impl Stores {
    pub async fn open(cfg: &AppConfig) -> StorageResult<Self> {
        let movies = open_read_only(&cfg.movies_db_path, cfg.db_max_connections).await?;
        info!(path = %cfg.movies_db_path, "connected to the movies database");

        let ratings = open_read_only(&cfg.ratings_db_path, cfg.db_max_connections).await?;
        info!(path = %cfg.ratings_db_path, "connected to the ratings database");

        Ok(Self { movies, ratings })
    }

    pub fn from_pools(movies: SqlitePool, ratings: SqlitePool) -> Self {
        Self { movies, ratings }
    }

    pub async fn close(&self) {
        self.movies.close().await;
        info!("movies database connection closed");
        self.ratings.close().await;
        info!("ratings database connection closed");
    }
}

async fn open_read_only(path: &str, max_connections: u32) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::new().filename(path).read_only(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(StorageError::Connection)
}
