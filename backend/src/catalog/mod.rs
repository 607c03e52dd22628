pub mod model;
pub mod repository;
pub mod repository_sqlx;
pub mod service;

pub use model::{MovieDetail, MovieSummary, PaginatedEnvelope, SortOrder};
pub use service::CatalogService;
