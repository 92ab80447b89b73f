// src/lib.rs
//! notion2gutenberg library: syncs posts from a Notion database into
//! Gutenberg-flavored HTML records.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `RemoteError`, `ConfigError`, `ValidationError`
//! - **Configuration**: `SyncConfig`, `CommandLineInput`, `RecordSchema`
//! - **Domain model**: `Block`, `Document`, `DocumentRecord`, `FilterPredicate`
//! - **Domain types**: `ApiKey`, `PageId`, `BlockId`, `DatabaseId`, `RichTextRun`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, parsers, pagination
//! - **Conversion**: `BlockConverter`, `convert_rich_text`, `build_filter`
//! - **Assembly**: `DocumentAssembler`, `extract_metadata`
//! - **Publishing**: `JsonPublisher`, `RecordPublisher`

#[cfg(feature = "bench")]
pub mod api;
#[cfg(not(feature = "bench"))]
mod api;

mod assembler;
mod config;
mod constants;
mod error;

#[cfg(feature = "bench")]
pub mod formatting;
#[cfg(not(feature = "bench"))]
mod formatting;

#[cfg(feature = "bench")]
pub mod model;
#[cfg(not(feature = "bench"))]
mod model;

mod output;
mod pipeline;
mod query;

#[cfg(feature = "bench")]
pub mod types;
#[cfg(not(feature = "bench"))]
mod types;

// --- Error Handling ---
pub use crate::error::{
    AppError, ConfigError, MalformedBlockError, NotionErrorCode, RemoteError,
};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::assembler::RecordSchema;
pub use crate::config::{CommandLineInput, SyncConfig};
pub use crate::constants::{
    DEFAULT_CONCURRENCY, MAX_CONCURRENCY, NOTION_API_BASE_URL, NOTION_API_VERSION,
};

// --- Domain Model ---
pub use crate::model::{
    Block, CodeBlock, Document, DocumentRecord, FilterPredicate, ParagraphBlock, SortSpec,
    UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, ApiKey, BlockId, DatabaseId, PageId, RichTextRun, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    client::{extract_response_text, ApiResponse},
    parser::{
        parse_api_response, parse_blocks_pagination, parse_document_response,
        parse_documents_pagination,
    },
    types::{PaginatedResponse, Pagination},
    NotionHttpClient, NotionRepository,
};

// --- Filter Builder ---
pub use crate::query::{base_predicate, build_filter, CollectionQuery, DocumentQuery};

// --- Block Conversion ---
pub use crate::formatting::{convert_rich_text, html_escape, BlockConverter};

// --- Document Assembly ---
pub use crate::assembler::{extract_metadata, DocumentAssembler, RecordMetadata};

// --- Pipeline Traits ---
pub use crate::pipeline::{DocumentSource, RecordPublisher};

// --- Publishing ---
pub use crate::output::{JsonPublisher, PublishReport, PublishTarget};
