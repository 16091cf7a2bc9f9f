//! Page/limit parsing and pagination metadata.
//!
//! `page` is 1-based. Out-of-range values are clamped rather than rejected;
//! only values that are not integers at all are errors.

use serde::{Deserialize, Serialize};

use crate::defaults::{PAGE, PAGE_LIMIT, PAGE_LIMIT_MAX, PAGE_LIMIT_MIN};
use crate::error::{Error, Result};

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    /// Rows to skip before this page starts.
    pub skip: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: PAGE,
            limit: PAGE_LIMIT,
            skip: 0,
        }
    }
}

impl PageRequest {
    /// Build a request from already-parsed numbers, applying the clamps.
    pub fn new(page: i64, limit: i64) -> Result<Self> {
        let page = page.max(1);
        let limit = limit.clamp(PAGE_LIMIT_MIN, PAGE_LIMIT_MAX);
        let skip = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| Error::InvalidPagination("Page is out of range".to_string()))?;
        Ok(Self { page, limit, skip })
    }

    /// Pagination metadata for this page given the total row count.
    pub fn meta(&self, total: i64) -> PaginationMeta {
        PaginationMeta::new(self.page, self.limit, total)
    }
}

/// Parse raw `page`/`limit` query values.
///
/// Absent or empty values fall back to the defaults.
pub fn parse_pagination(page: Option<&str>, limit: Option<&str>) -> Result<PageRequest> {
    let page = parse_param(page, "Page")?.unwrap_or(PAGE);
    let limit = parse_param(limit, "Limit")?.unwrap_or(PAGE_LIMIT);
    PageRequest::new(page, limit)
}

fn parse_param(raw: Option<&str>, name: &str) -> Result<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| Error::InvalidPagination(format!("{} must be an integer", name))),
    }
}

/// Pagination envelope returned alongside a page of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    /// Total matching rows across all pages
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        }
    }
}
