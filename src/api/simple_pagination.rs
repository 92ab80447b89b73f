// src/api/simple_pagination.rs
//! Cursor-following pagination without BoxFuture.

use super::types::{PaginatedResponse, PaginationResult};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use std::collections::HashSet;

/// Fetches all pages using async closures directly.
///
/// `fetch_fn` receives the page size and the cursor of the page to fetch
/// (`None` for the first one). A cursor Notion has already handed out
/// ends the walk, and the result is marked truncated.
pub async fn fetch_all_pages_simple<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<PaginationResult<T>, AppError>
where
    T: Send + 'static,
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;
    let mut truncated = false;
    let mut seen_cursors = HashSet::new();

    loop {
        let response = fetch_fn(NOTION_API_PAGE_SIZE, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        let Some(next) = cursor.as_deref().filter(|_| has_more) else {
            break;
        };
        if !seen_cursors.insert(next.to_string()) {
            log::warn!(
                "Notion returned cursor {} twice; stopping after {} page(s)",
                next,
                pages_fetched
            );
            truncated = true;
            break;
        }

        if let Some(max) = max_pages {
            if pages_fetched >= max {
                log::debug!("Reached maximum page limit: {}", max);
                truncated = true;
                break;
            }
        }
    }

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
        truncated,
    })
}
