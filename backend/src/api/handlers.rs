use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use super::validation::{self, ValidationError};
use crate::catalog::{MovieDetail, MovieSummary, PaginatedEnvelope};
use crate::error::StorageError;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub page: Option<String>,
    pub order: Option<String>,
}

/// Failure body returned by every endpoint: `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(ValidationError),
    NotFound(&'static str),
    Internal(&'static str),
}

impl ApiError {
    /// Logs the storage failure and hides it behind an operation-level message.
    fn storage(message: &'static str, err: StorageError) -> Self {
        tracing::error!(error = %err, "{message}");
        Self::Internal(message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::BadRequest(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound(m) => (StatusCode::NOT_FOUND, m.to_string()),
            Self::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "message": "Service is running" })),
    )
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found")
}

pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<PaginatedEnvelope<MovieSummary>> {
    let page = validation::parse_page(query.page.as_deref());

    let movies = state
        .catalog
        .list_all_movies(page)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch movies", e))?;

    Ok(Json(movies))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<MovieDetail> {
    let movie = state
        .catalog
        .get_movie_by_id(&id)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch movie details", e))?
        .ok_or(ApiError::NotFound("Movie not found"))?;

    Ok(Json(movie))
}

pub async fn list_movies_by_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
    Query(query): Query<YearQuery>,
) -> ApiResult<PaginatedEnvelope<MovieSummary>> {
    let year = validation::parse_year(&year)?;
    let page = validation::parse_page(query.page.as_deref());
    let order = validation::parse_order(query.order.as_deref())?;

    let movies = state
        .catalog
        .list_movies_by_year(year, page, order)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch movies by year", e))?;

    Ok(Json(movies))
}

pub async fn list_movies_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<PaginatedEnvelope<MovieSummary>> {
    let genre = validation::parse_genre(&genre)?;
    let page = validation::parse_page(query.page.as_deref());

    let movies = state
        .catalog
        .list_movies_by_genre(genre, page)
        .await
        .map_err(|e| ApiError::storage("Failed to fetch movies by genre", e))?;

    Ok(Json(movies))
}
