pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod normalize;
pub mod pagination;

pub mod error;
pub mod logger;
