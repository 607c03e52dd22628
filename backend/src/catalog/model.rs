use std::str::FromStr;

use serde::Serialize;

use crate::normalize::{AverageRating, RawBudget, normalize_budget, normalize_rating};
use crate::pagination::PaginationMetadata;

/// Listing row as read from the movies store, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub genres: Option<String>,
    pub release_date: Option<String>,
    pub budget: RawBudget,
}

/// Single-movie row from the movies store. The rating lives in the other
/// store and is merged in by the service.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetailRow {
    pub movie: MovieRow,
    pub description: Option<String>,
    pub runtime: Option<i64>,
    pub original_language: Option<String>,
    pub production_companies: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub genres: Option<String>,
    pub release_date: Option<String>,
    pub budget: String,
}

impl From<MovieRow> for MovieSummary {
    fn from(row: MovieRow) -> Self {
        Self {
            budget: normalize_budget(&row.budget),
            imdb_id: row.imdb_id,
            title: row.title,
            genres: row.genres,
            release_date: row.release_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub description: Option<String>,
    pub runtime: Option<i64>,
    pub original_language: Option<String>,
    pub production_companies: Option<String>,
    pub average_rating: AverageRating,
}

impl MovieDetail {
    /// Joins a movie row with the aggregate read from the ratings store.
    pub fn merge(row: MovieDetailRow, average_rating: Option<f64>) -> Self {
        Self {
            summary: row.movie.into(),
            description: row.description,
            runtime: row.runtime,
            original_language: row.original_language,
            production_companies: row.production_companies,
            average_rating: normalize_rating(average_rating),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedEnvelope<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMetadata,
}

/// Release-date ordering for year listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}
