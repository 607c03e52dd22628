use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use movie_catalog::catalog::SortOrder;
use movie_catalog::catalog::model::{MovieDetailRow, MovieRow};
use movie_catalog::catalog::repository::{MovieRepository, RatingRepository};
use movie_catalog::error::{StorageError, StorageResult};
use movie_catalog::pagination::OffsetLimit;

fn store_down() -> StorageError {
    StorageError::Connection(sqlx::Error::PoolTimedOut)
}

/// Wraps a real repository and fails count or row queries on demand.
pub struct FlakyMovies {
    pub inner: Arc<dyn MovieRepository>,
    pub fail_counts: bool,
    pub fail_rows: bool,
}

impl FlakyMovies {
    fn count(&self) -> StorageResult<()> {
        if self.fail_counts {
            Err(store_down())
        } else {
            Ok(())
        }
    }

    fn rows(&self) -> StorageResult<()> {
        if self.fail_rows {
            Err(store_down())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MovieRepository for FlakyMovies {
    async fn count_all(&self) -> StorageResult<u64> {
        self.count()?;
        self.inner.count_all().await
    }

    async fn count_by_year(&self, year: i32) -> StorageResult<u64> {
        self.count()?;
        self.inner.count_by_year(year).await
    }

    async fn count_by_genre(&self, genre: &str) -> StorageResult<u64> {
        self.count()?;
        self.inner.count_by_genre(genre).await
    }

    async fn list_all(&self, window: OffsetLimit) -> StorageResult<Vec<MovieRow>> {
        self.rows()?;
        self.inner.list_all(window).await
    }

    async fn list_by_year(
        &self,
        year: i32,
        window: OffsetLimit,
        order: SortOrder,
    ) -> StorageResult<Vec<MovieRow>> {
        self.rows()?;
        self.inner.list_by_year(year, window, order).await
    }

    async fn list_by_genre(
        &self,
        genre: &str,
        window: OffsetLimit,
    ) -> StorageResult<Vec<MovieRow>> {
        self.rows()?;
        self.inner.list_by_genre(genre, window).await
    }

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<MovieDetailRow>> {
        self.rows()?;
        self.inner.get_by_id(id).await
    }
}

/// Ratings double that records how often it was asked.
#[derive(Default)]
pub struct CountingRatings {
    pub average: Option<f64>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

impl CountingRatings {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RatingRepository for CountingRatings {
    async fn average_rating(&self, _movie_id: &str) -> StorageResult<Option<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(store_down());
        }
        Ok(self.average)
    }
}
