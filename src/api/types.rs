// src/api/types.rs
//! Type definitions for the Notion API module.

use serde::Deserialize;

/// Whether list endpoints follow `next_cursor` past the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// Keep requesting pages while Notion reports `has_more`.
    #[default]
    FollowCursors,
    /// Stop after the first page; a truncated listing is logged.
    SinglePage,
}

impl Pagination {
    /// The page cap handed to the pagination loop.
    pub fn max_pages(self) -> Option<u32> {
        match self {
            Pagination::FollowCursors => None,
            Pagination::SinglePage => Some(1),
        }
    }
}

/// Generic paginated response from Notion API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// A final page holding `results`.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: "list".to_string(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }
}

/// Result of a pagination operation.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
    /// Notion had more results than the page cap allowed.
    pub truncated: bool,
}
