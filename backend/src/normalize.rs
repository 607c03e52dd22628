//! Coercion of stored values into their external representation.
use bigdecimal::{BigDecimal, RoundingMode};
use serde::{Serialize, Serializer};

pub const UNKNOWN_BUDGET: &str = "Unknown";
pub const NO_RATINGS: &str = "No ratings available";

/// Budget exactly as the movies store holds it. SQLite columns are
/// dynamically typed, so the same column yields numbers, text or NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBudget {
    Numeric(f64),
    Text(String),
    Absent,
}

/// Aggregated rating, or the marker used when no rating exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageRating {
    Rated(f64),
    Unavailable,
}

impl Serialize for AverageRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rated(v) => serializer.serialize_f64(*v),
            Self::Unavailable => serializer.serialize_str(NO_RATINGS),
        }
    }
}

/// Renders a budget as US dollars with thousands separators.
///
/// Zero, non-finite, unparsable and missing budgets all render as
/// [`UNKNOWN_BUDGET`]. Text is read up to the first non-digit, so
/// `"1e6"` is 1 and `"12abc"` is 12.
pub fn normalize_budget(raw: &RawBudget) -> String {
    let amount = match raw {
        RawBudget::Numeric(v) => format_numeric(*v),
        RawBudget::Text(s) => format_leading_integer(s),
        RawBudget::Absent => None,
    };

    match amount {
        Some(a) => format!("${a}"),
        None => UNKNOWN_BUDGET.to_string(),
    }
}

pub fn normalize_rating(raw: Option<f64>) -> AverageRating {
    match raw.and_then(round_one_decimal) {
        Some(v) => AverageRating::Rated(v),
        None => AverageRating::Unavailable,
    }
}

// Rounds the exact binary value, ties away from zero: 4.55 is stored as
// 4.5499... and becomes 4.5.
fn round_one_decimal(v: f64) -> Option<f64> {
    let exact = BigDecimal::try_from(v).ok()?;
    exact
        .with_scale_round(1, RoundingMode::HalfUp)
        .to_string()
        .parse()
        .ok()
}

// Up to three fraction digits, trailing zeros dropped.
fn format_numeric(v: f64) -> Option<String> {
    if !v.is_finite() || v == 0.0 {
        return None;
    }

    let rendered = format!("{:.3}", v.abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

fn format_leading_integer(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let significant = rest[..end].trim_start_matches('0');
    if significant.is_empty() {
        return None;
    }

    let grouped = group_thousands(significant);
    Some(if negative { format!("-{grouped}") } else { grouped })
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
