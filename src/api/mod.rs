// src/api/mod.rs
//! Notion API interaction: reading posts and their blocks from a workspace.
//!
//! This module provides a data-oriented interface to the Notion API,
//! with clear separation between I/O operations, parsing, and business logic.

pub mod client;
pub mod parser;
mod simple_pagination;
pub mod types;

use crate::error::AppError;
use crate::model::{Block, Document};
use crate::query::CollectionQuery;
use crate::types::{BlockId, DatabaseId, PageId};
use types::{PaginatedResponse, Pagination};

/// The ability to retrieve content from a Notion workspace.
///
/// Implementors provide the three raw endpoints, one page at a time.
/// Cursor-following is layered on top by the provided methods, so test
/// doubles only have to answer single requests.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// `GET /pages/{id}`
    async fn retrieve_document(&self, id: &PageId) -> Result<Document, AppError>;

    /// One page of `GET /blocks/{id}/children`.
    async fn children_page(
        &self,
        parent: &BlockId,
        page_size: u32,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError>;

    /// One page of `POST /databases/{id}/query`; the cursor travels in `query`.
    async fn query_page(
        &self,
        database: &DatabaseId,
        query: &CollectionQuery,
    ) -> Result<PaginatedResponse<Document>, AppError>;

    /// Every child block of `parent`, in Notion's order.
    async fn list_children(
        &self,
        parent: &BlockId,
        pagination: Pagination,
    ) -> Result<Vec<Block>, AppError> {
        let result = simple_pagination::fetch_all_pages_simple(
            |page_size, cursor| self.children_page(parent, page_size, cursor),
            pagination.max_pages(),
        )
        .await?;

        if result.truncated {
            log::warn!(
                "Block {} has more children than the first page; {} kept (pagination disabled)",
                parent,
                result.total_fetched
            );
        }
        Ok(result.items)
    }

    /// Every document matching `query`, in Notion's order.
    async fn query_collection(
        &self,
        database: &DatabaseId,
        query: &CollectionQuery,
        pagination: Pagination,
    ) -> Result<Vec<Document>, AppError> {
        let result = simple_pagination::fetch_all_pages_simple(
            |page_size, cursor| {
                let page_query = query.page(page_size, cursor);
                async move { self.query_page(database, &page_query).await }
            },
            pagination.max_pages(),
        )
        .await?;

        if result.truncated {
            log::warn!(
                "Database {} query matched more documents than the first page; {} kept (pagination disabled)",
                database,
                result.total_fetched
            );
        }
        Ok(result.items)
    }
}

// Re-export the public interface
pub use client::{ApiResponse, NotionHttpClient};
