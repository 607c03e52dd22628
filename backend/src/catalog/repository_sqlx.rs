use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::instrument;

use crate::catalog::model::{MovieDetailRow, MovieRow, SortOrder};
use crate::catalog::repository::{MovieRepository, RatingRepository};
use crate::error::{StorageError, StorageResult};
use crate::logger::warn_if_slow;
use crate::normalize::RawBudget;
use crate::pagination::OffsetLimit;

const SLOW_QUERY: Duration = Duration::from_millis(100);

// `typeof(budget)` tells the row mapper which representation the column
// actually holds for this row.
const SUMMARY_COLUMNS: &str = r#"
  imdbId AS imdb_id,
  title,
  genres,
  releaseDate AS release_date,
  typeof(budget) AS budget_kind,
  budget
"#;

const DETAIL_COLUMNS: &str = r#"
  imdbId AS imdb_id,
  title,
  overview AS description,
  releaseDate AS release_date,
  typeof(budget) AS budget_kind,
  budget,
  CAST(runtime AS INTEGER) AS runtime,
  genres,
  language AS original_language,
  productionCompanies AS production_companies
"#;

const YEAR_FILTER: &str = "strftime('%Y', releaseDate) = ?";
const GENRE_FILTER: &str = "genres LIKE ?";

type SqliteQuery<'q> = sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>;

/// SQLx-backed reads against the movies store.
/// Responsible only for query text and row mapping.
pub struct SqlxMovieRepository {
    pool: SqlitePool,
}

impl SqlxMovieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn count(&self, label: &'static str, query: SqliteQuery<'_>) -> StorageResult<u64> {
        let row = warn_if_slow(label, SLOW_QUERY, query.fetch_one(&self.pool)).await?;
        i64_to_u64(row.try_get("count")?)
    }

    async fn fetch_rows(
        &self,
        label: &'static str,
        query: SqliteQuery<'_>,
    ) -> StorageResult<Vec<MovieRow>> {
        let rows = warn_if_slow(label, SLOW_QUERY, query.fetch_all(&self.pool)).await?;
        rows.iter().map(row_to_movie).collect()
    }
}

#[async_trait]
impl MovieRepository for SqlxMovieRepository {
    #[instrument(skip(self), target = "repository")]
    async fn count_all(&self) -> StorageResult<u64> {
        self.count(
            "db_count_all",
            sqlx::query("SELECT COUNT(*) AS count FROM movies"),
        )
        .await
    }

    #[instrument(skip(self), target = "repository")]
    async fn count_by_year(&self, year: i32) -> StorageResult<u64> {
        let sql = format!("SELECT COUNT(*) AS count FROM movies WHERE {YEAR_FILTER}");
        self.count("db_count_by_year", sqlx::query(&sql).bind(year.to_string()))
            .await
    }

    #[instrument(skip(self), target = "repository")]
    async fn count_by_genre(&self, genre: &str) -> StorageResult<u64> {
        let sql = format!("SELECT COUNT(*) AS count FROM movies WHERE {GENRE_FILTER}");
        self.count("db_count_by_genre", sqlx::query(&sql).bind(contains(genre)))
            .await
    }

    #[instrument(skip(self), target = "repository")]
    async fn list_all(&self, window: OffsetLimit) -> StorageResult<Vec<MovieRow>> {
        let sql = format!("SELECT {SUMMARY_COLUMNS} FROM movies LIMIT ? OFFSET ?");
        let query = bind_window(sqlx::query(&sql), window);
        self.fetch_rows("db_list_all", query).await
    }

    #[instrument(skip(self), target = "repository")]
    async fn list_by_year(
        &self,
        year: i32,
        window: OffsetLimit,
        order: SortOrder,
    ) -> StorageResult<Vec<MovieRow>> {
        let order = order.as_sql();
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM movies WHERE {YEAR_FILTER} \
             ORDER BY releaseDate {order}, movieId ASC LIMIT ? OFFSET ?"
        );
        let query = bind_window(sqlx::query(&sql).bind(year.to_string()), window);
        self.fetch_rows("db_list_by_year", query).await
    }

    #[instrument(skip(self), target = "repository")]
    async fn list_by_genre(
        &self,
        genre: &str,
        window: OffsetLimit,
    ) -> StorageResult<Vec<MovieRow>> {
        let sql = format!(
            "SELECT {SUMMARY_COLUMNS} FROM movies WHERE {GENRE_FILTER} \
             ORDER BY releaseDate ASC, movieId ASC LIMIT ? OFFSET ?"
        );
        let query = bind_window(sqlx::query(&sql).bind(contains(genre)), window);
        self.fetch_rows("db_list_by_genre", query).await
    }

    #[instrument(skip(self), target = "repository")]
    async fn get_by_id(&self, id: &str) -> StorageResult<Option<MovieDetailRow>> {
        let sql = format!("SELECT {DETAIL_COLUMNS} FROM movies WHERE movieId = ?");
        let row = warn_if_slow(
            "db_get_by_id",
            SLOW_QUERY,
            sqlx::query(&sql).bind(id).fetch_optional(&self.pool),
        )
        .await?;

        match row {
            Some(r) => Ok(Some(row_to_detail(&r)?)),
            None => Ok(None),
        }
    }
}

/// SQLx-backed aggregate reads against the ratings store.
pub struct SqlxRatingRepository {
    pool: SqlitePool,
}

impl SqlxRatingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for SqlxRatingRepository {
    #[instrument(skip(self), target = "repository")]
    async fn average_rating(&self, movie_id: &str) -> StorageResult<Option<f64>> {
        // AVG over zero rows yields a single NULL row.
        let row = warn_if_slow(
            "db_average_rating",
            SLOW_QUERY,
            sqlx::query("SELECT AVG(rating) AS average_rating FROM ratings WHERE movieId = ?")
                .bind(movie_id)
                .fetch_one(&self.pool),
        )
        .await?;

        Ok(row.try_get::<Option<f64>, _>("average_rating")?)
    }
}

/* =========================
Query helpers
========================= */

// LIKE metacharacters in `genre` are passed through untouched.
fn contains(genre: &str) -> String {
    format!("%{genre}%")
}

fn bind_window(query: SqliteQuery<'_>, window: OffsetLimit) -> SqliteQuery<'_> {
    query
        .bind(i64::from(window.limit))
        .bind(i64::try_from(window.offset).unwrap_or(i64::MAX))
}

/* =========================
Row mapping
========================= */

fn row_to_movie(r: &SqliteRow) -> StorageResult<MovieRow> {
    Ok(MovieRow {
        imdb_id: r.try_get("imdb_id")?,
        title: r.try_get("title")?,
        genres: r.try_get("genres")?,
        release_date: r.try_get("release_date")?,
        budget: read_budget(r)?,
    })
}

fn row_to_detail(r: &SqliteRow) -> StorageResult<MovieDetailRow> {
    Ok(MovieDetailRow {
        movie: row_to_movie(r)?,
        description: r.try_get("description")?,
        runtime: r.try_get("runtime")?,
        original_language: r.try_get("original_language")?,
        production_companies: r.try_get("production_companies")?,
    })
}

fn read_budget(r: &SqliteRow) -> StorageResult<RawBudget> {
    let kind: String = r.try_get("budget_kind")?;
    let budget = match kind.as_str() {
        "integer" => RawBudget::Numeric(r.try_get::<i64, _>("budget")? as f64),
        "real" => RawBudget::Numeric(r.try_get::<f64, _>("budget")?),
        "text" => RawBudget::Text(r.try_get::<String, _>("budget")?),
        // null and blob
        _ => RawBudget::Absent,
    };
    Ok(budget)
}

fn i64_to_u64(v: i64) -> StorageResult<u64> {
    u64::try_from(v).map_err(|_| StorageError::Decode(format!("negative count: {v}")))
}
