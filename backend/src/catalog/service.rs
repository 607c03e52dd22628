use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::catalog::model::{MovieDetail, MovieRow, MovieSummary, PaginatedEnvelope, SortOrder};
use crate::catalog::repository::{MovieRepository, RatingRepository};
use crate::catalog::repository_sqlx::{SqlxMovieRepository, SqlxRatingRepository};
use crate::db::Stores;
use crate::error::StorageResult;
use crate::pagination::{PaginationMetadata, offset_limit};

/// Read-side facade over both stores.
///
/// Listings issue the count and the page query concurrently; they share a
/// filter but not a snapshot, so a concurrent writer can make them disagree
/// slightly. Either query failing fails the whole call.
pub struct CatalogService {
    movies: Arc<dyn MovieRepository>,
    ratings: Arc<dyn RatingRepository>,
    page_size: NonZeroU32,
}

impl CatalogService {
    pub fn new(
        movies: Arc<dyn MovieRepository>,
        ratings: Arc<dyn RatingRepository>,
        page_size: NonZeroU32,
    ) -> Self {
        Self {
            movies,
            ratings,
            page_size,
        }
    }

    /// Wires the SQLx repositories over the shared store handles.
    pub fn over_stores(stores: &Stores, page_size: NonZeroU32) -> Self {
        Self::new(
            Arc::new(SqlxMovieRepository::new(stores.movies.clone())),
            Arc::new(SqlxRatingRepository::new(stores.ratings.clone())),
            page_size,
        )
    }

    #[instrument(skip(self), target = "catalog")]
    pub async fn list_all_movies(
        &self,
        page: i64,
    ) -> StorageResult<PaginatedEnvelope<MovieSummary>> {
        let window = offset_limit(page, self.page_size);
        let (total, rows) =
            tokio::try_join!(self.movies.count_all(), self.movies.list_all(window))?;

        Ok(self.envelope(page, total, rows))
    }

    /// `Ok(None)` when no movie has this id.
    #[instrument(skip(self), target = "catalog")]
    pub async fn get_movie_by_id(&self, id: &str) -> StorageResult<Option<MovieDetail>> {
        let Some(row) = self.movies.get_by_id(id).await? else {
            debug!("movie not found");
            return Ok(None);
        };

        let rating = self.ratings.average_rating(id).await?;
        Ok(Some(MovieDetail::merge(row, rating)))
    }

    #[instrument(skip(self), target = "catalog")]
    pub async fn list_movies_by_year(
        &self,
        year: i32,
        page: i64,
        order: SortOrder,
    ) -> StorageResult<PaginatedEnvelope<MovieSummary>> {
        let window = offset_limit(page, self.page_size);
        let (total, rows) = tokio::try_join!(
            self.movies.count_by_year(year),
            self.movies.list_by_year(year, window, order)
        )?;

        Ok(self.envelope(page, total, rows))
    }

    #[instrument(skip(self), target = "catalog")]
    pub async fn list_movies_by_genre(
        &self,
        genre: &str,
        page: i64,
    ) -> StorageResult<PaginatedEnvelope<MovieSummary>> {
        let window = offset_limit(page, self.page_size);
        let (total, rows) = tokio::try_join!(
            self.movies.count_by_genre(genre),
            self.movies.list_by_genre(genre, window)
        )?;

        Ok(self.envelope(page, total, rows))
    }

    fn envelope(
        &self,
        page: i64,
        total: u64,
        rows: Vec<MovieRow>,
    ) -> PaginatedEnvelope<MovieSummary> {
        debug!(total, returned = rows.len(), "assembled page");
        PaginatedEnvelope {
            data: rows.into_iter().map(MovieSummary::from).collect(),
            pagination: PaginationMetadata::compute(page, total, self.page_size),
        }
    }
}
