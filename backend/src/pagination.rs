//! Page arithmetic shared by every listing.
//!
//! Requested pages below 1 are treated as page 1. There is no upper bound:
//! a page past the end simply yields an empty row set from storage.
use std::num::NonZeroU32;

use serde::Serialize;

/// Window of rows to fetch from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetLimit {
    pub offset: u64,
    pub limit: u32,
}

fn clamp_page(page: i64) -> u64 {
    page.max(1).unsigned_abs()
}

pub fn offset_limit(page: i64, page_size: NonZeroU32) -> OffsetLimit {
    let page = clamp_page(page);
    OffsetLimit {
        offset: (page - 1).saturating_mul(u64::from(page_size.get())),
        limit: page_size.get(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub current_page: u64,
    pub total_items: u64,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMetadata {
    pub fn compute(page: i64, total_items: u64, page_size: NonZeroU32) -> Self {
        let current_page = clamp_page(page);
        let total_pages = total_items.div_ceil(u64::from(page_size.get()));

        Self {
            current_page,
            total_items,
            page_size: page_size.get(),
            total_pages,
            has_next_page: current_page < total_pages,
            // An empty result set has no neighbours in either direction.
            has_previous_page: current_page > 1 && total_items > 0,
        }
    }
}
