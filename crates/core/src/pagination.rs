//! Offset/limit pagination.
//!
//! Out-of-range parameters are rejected rather than clamped, so a client
//! asking for `limit=500` learns that it will never get more than
//! [`MAX_LIMIT`] items per page.

use serde::Serialize;
use validator::Validate;

use crate::error::CoreError;

/// Items per page when `limit` is omitted.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest accepted `limit`.
pub const MAX_LIMIT: i64 = 100;

/// Raw pagination parameters as they arrive on the query string.
#[derive(Debug, Default, Clone, Validate)]
pub struct PageParams {
    #[validate(range(min = 0, message = "offset must be greater than or equal to 0"))]
    pub offset: Option<i64>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = CoreError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        params.validate()?;
        Ok(Self {
            offset: params.offset.unwrap_or(0),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
        })
    }
}

impl PageRequest {
    /// Validate optional query values and apply defaults.
    pub fn from_query(offset: Option<i64>, limit: Option<i64>) -> Result<Self, CoreError> {
        PageParams { offset, limit }.try_into()
    }
}

/// Navigation metadata returned alongside every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Number of matching items, ignoring offset and limit.
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_offset: Option<i64>,
    pub previous_offset: Option<i64>,
}

impl PageMeta {
    pub fn new(total: i64, request: PageRequest) -> Self {
        let PageRequest { offset, limit } = request;
        let end = offset.saturating_add(limit);
        let has_next = end < total;
        let has_previous = offset > 0;

        Self {
            total,
            offset,
            limit,
            has_next,
            has_previous,
            next_offset: has_next.then_some(end),
            previous_offset: has_previous.then(|| (offset - limit).max(0)),
        }
    }
}

/// A bounded slice of a filtered list plus its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            meta: PageMeta::new(total, request),
        }
    }
}
