use async_trait::async_trait;

use crate::catalog::model::{MovieDetailRow, MovieRow, SortOrder};
use crate::error::StorageResult;
use crate::pagination::OffsetLimit;

/// Read access to the movies store.
///
/// Inputs are trusted: callers validate years, orders and genres before
/// they get here.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn count_all(&self) -> StorageResult<u64>;

    /// Movies whose release-date year equals `year`.
    async fn count_by_year(&self, year: i32) -> StorageResult<u64>;

    /// Movies whose genre field contains `genre` as a substring.
    async fn count_by_genre(&self, genre: &str) -> StorageResult<u64>;

    /// Natural storage order.
    async fn list_all(&self, window: OffsetLimit) -> StorageResult<Vec<MovieRow>>;

    async fn list_by_year(
        &self,
        year: i32,
        window: OffsetLimit,
        order: SortOrder,
    ) -> StorageResult<Vec<MovieRow>>;

    /// Ordered by release date ascending.
    async fn list_by_genre(
        &self,
        genre: &str,
        window: OffsetLimit,
    ) -> StorageResult<Vec<MovieRow>>;

    async fn get_by_id(&self, id: &str) -> StorageResult<Option<MovieDetailRow>>;
}

/// Read access to the ratings store.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Mean rating for the movie, `None` when it has no ratings.
    async fn average_rating(&self, movie_id: &str) -> StorageResult<Option<f64>>;
}
