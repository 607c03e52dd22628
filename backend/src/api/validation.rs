//! Parsing of path and query primitives before they reach the catalog.
//!
//! Numbers are read the lenient way browsers and the existing clients
//! expect: leading whitespace, an optional sign, then digits up to the
//! first non-digit (`"2e3"` is 2).
use thiserror::Error;

use crate::catalog::SortOrder;

pub const MIN_YEAR: i32 = 1888;
pub const MAX_YEAR: i32 = 2030;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid year parameter")]
    InvalidYear,

    #[error("Sort order must be \"asc\" or \"desc\"")]
    InvalidOrder,

    #[error("Genre parameter is required")]
    MissingGenre,
}

/// Missing, unparsable and zero pages mean page 1. Negative pages are
/// passed through; the pagination layer clamps them.
pub fn parse_page(raw: Option<&str>) -> i64 {
    match raw.and_then(parse_leading_int) {
        Some(0) | None => 1,
        Some(page) => page,
    }
}

pub fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    parse_leading_int(raw)
        .and_then(|y| i32::try_from(y).ok())
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or(ValidationError::InvalidYear)
}

pub fn parse_order(raw: Option<&str>) -> Result<SortOrder, ValidationError> {
    match raw {
        None | Some("") => Ok(SortOrder::Asc),
        Some(s) => s.parse().map_err(|_| ValidationError::InvalidOrder),
    }
}

pub fn parse_genre(raw: &str) -> Result<&str, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingGenre);
    }
    Ok(raw)
}

fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }
    let sign_len = trimmed.len() - unsigned.len();
    trimmed[..sign_len + end].parse().ok()
}
