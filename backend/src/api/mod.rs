pub mod handlers;
pub mod middleware;
pub mod validation;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::catalog::CatalogService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/movies", get(handlers::list_movies))
        .route("/api/movies/{id}", get(handlers::get_movie))
        .route("/api/movies/year/{year}", get(handlers::list_movies_by_year))
        .route("/api/movies/genre/{genre}", get(handlers::list_movies_by_genre))
        .fallback(handlers::route_not_found)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::trace_request))
        .with_state(state)
}
