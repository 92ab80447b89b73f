// src/assembler/mod.rs
//! Document assembly: turns a posts query into finished [`DocumentRecord`]s.
//!
//! The assembler composes the three lower layers. It scopes the caller's
//! filter with the base predicate, runs the collection query, and then
//! fetches and converts each document's blocks. Block fetches for
//! different documents run concurrently up to a configured limit, while
//! records come back in the order Notion returned the documents.

mod metadata;

pub use metadata::{extract_metadata, RecordMetadata, RecordSchema};

use crate::api::types::Pagination;
use crate::api::NotionRepository;
use crate::config::SyncConfig;
use crate::constants::{DEFAULT_CONCURRENCY, MAX_CONCURRENCY};
use crate::error::AppError;
use crate::formatting::BlockConverter;
use crate::model::{Document, DocumentRecord, FilterPredicate, SortSpec};
use crate::pipeline::DocumentSource;
use crate::query::{CollectionQuery, DocumentQuery};
use crate::types::{DatabaseId, PageId};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

/// Builds post records from a Notion database.
///
/// Holds no per-call state, so one assembler can serve any number of
/// [`get_documents`](Self::get_documents) calls.
pub struct DocumentAssembler {
    repository: Arc<dyn NotionRepository>,
    converter: BlockConverter,
    database: DatabaseId,
    schema: RecordSchema,
    concurrency: usize,
    pagination: Pagination,
}

impl DocumentAssembler {
    pub fn new(
        repository: Arc<dyn NotionRepository>,
        converter: BlockConverter,
        database: DatabaseId,
    ) -> Self {
        Self {
            repository,
            converter,
            database,
            schema: RecordSchema::default(),
            concurrency: DEFAULT_CONCURRENCY,
            pagination: Pagination::default(),
        }
    }

    /// An assembler set up the way `config` describes.
    pub fn from_config(repository: Arc<dyn NotionRepository>, config: &SyncConfig) -> Self {
        let converter = if config.gutenberg_markup {
            BlockConverter::gutenberg()
        } else {
            BlockConverter::new()
        };

        Self::new(repository, converter, config.database_id.clone())
            .with_schema(config.schema.clone())
            .with_concurrency(config.concurrency)
            .with_pagination(config.pagination)
    }

    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Caps concurrent child-block fetches; clamped to `1..=MAX_CONCURRENCY`.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Every post matching `filter`, sorted by `sort`, with content.
    ///
    /// Fails with the first remote error; a failed query returns nothing.
    pub async fn get_documents(
        &self,
        filter: Option<FilterPredicate>,
        sort: SortSpec,
    ) -> Result<Vec<DocumentRecord>, AppError> {
        let query = CollectionQuery::scoped(DocumentQuery::new(filter, sort));
        log::info!("Querying database {} for posts", self.database);

        let documents = self
            .repository
            .query_collection(&self.database, &query, self.pagination)
            .await?;
        log::info!(
            "Query returned {} document(s); fetching content with up to {} request(s) in flight",
            documents.len(),
            self.concurrency
        );

        let records: Vec<DocumentRecord> = stream::iter(documents)
            .map(|document| self.assemble(document))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        log::info!("Assembled {} record(s)", records.len());
        Ok(records)
    }

    /// The record for a single page, whatever its type.
    pub async fn get_document_record(&self, id: &PageId) -> Result<DocumentRecord, AppError> {
        let document = self.repository.retrieve_document(id).await?;
        self.assemble(document).await
    }

    /// The page's blocks as fragments, in block order.
    ///
    /// Unsupported blocks are logged and left out.
    pub async fn render_content(&self, page: &PageId) -> Result<Vec<String>, AppError> {
        let blocks = self
            .repository
            .list_children(&page.as_block_id(), self.pagination)
            .await?;

        let mut fragments = Vec::with_capacity(blocks.len());
        for block in &blocks {
            match self.converter.convert_block(block) {
                Some(fragment) => fragments.push(fragment),
                None => log::warn!(
                    "Skipping unsupported {} block {} in document {}",
                    block.block_type(),
                    block.id(),
                    page
                ),
            }
        }

        log::info!(
            "Document {}: {} of {} block(s) converted",
            page,
            fragments.len(),
            blocks.len()
        );
        Ok(fragments)
    }

    async fn assemble(&self, document: Document) -> Result<DocumentRecord, AppError> {
        let metadata = extract_metadata(&document, &self.schema);
        let content = self.render_content(&document.id).await?;

        Ok(DocumentRecord {
            id: document.id,
            kind: metadata.kind,
            created_at: metadata.created_at,
            modified_at: metadata.modified_at,
            title: metadata.title,
            status: metadata.status,
            categories: metadata.categories,
            content,
        })
    }
}

#[async_trait::async_trait]
impl DocumentSource for DocumentAssembler {
    async fn fetch_records(&self, query: DocumentQuery) -> Result<Vec<DocumentRecord>, AppError> {
        self.get_documents(query.filter, query.sort).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::PaginatedResponse;
    use crate::model::Block;
    use crate::types::{BlockId, RichTextRun};
    use serde_json::json;
    use std::sync::Mutex;

    /// Serves one database and records the query bodies it receives.
    #[derive(Default)]
    struct StubRepository {
        documents: Vec<Document>,
        blocks: Vec<Block>,
        queries: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait::async_trait]
    impl NotionRepository for StubRepository {
        async fn retrieve_document(&self, id: &PageId) -> Result<Document, AppError> {
            Ok(serde_json::from_value(json!({ "id": id.as_str(), "properties": {} }))?)
        }

        async fn children_page(
            &self,
            _parent: &BlockId,
            _page_size: u32,
            _cursor: Option<String>,
        ) -> Result<PaginatedResponse<Block>, AppError> {
            Ok(PaginatedResponse::last(self.blocks.clone()))
        }

        async fn query_page(
            &self,
            _database: &DatabaseId,
            query: &CollectionQuery,
        ) -> Result<PaginatedResponse<Document>, AppError> {
            self.queries
                .lock()
                .unwrap()
                .push(serde_json::to_value(query)?);
            Ok(PaginatedResponse::last(self.documents.clone()))
        }
    }

    fn assembler(repository: Arc<StubRepository>) -> DocumentAssembler {
        DocumentAssembler::new(
            repository,
            BlockConverter::new(),
            DatabaseId::parse("db").unwrap(),
        )
    }

    fn block_id(id: &str) -> BlockId {
        BlockId::parse(id).unwrap()
    }

    #[test]
    fn concurrency_is_clamped() {
        let repository = Arc::new(StubRepository::default());
        assert_eq!(assembler(repository.clone()).with_concurrency(0).concurrency(), 1);
        assert_eq!(
            assembler(repository).with_concurrency(1000).concurrency(),
            MAX_CONCURRENCY
        );
    }

    #[tokio::test]
    async fn config_selects_markup_and_limits() {
        let repository = Arc::new(StubRepository {
            blocks: vec![Block::code(block_id("c"), vec![RichTextRun::plain("x")])],
            ..Default::default()
        });
        let config = SyncConfig {
            concurrency: 5,
            gutenberg_markup: true,
            pagination: Pagination::SinglePage,
            ..Default::default()
        };

        let assembler = DocumentAssembler::from_config(repository, &config);
        assert_eq!(assembler.concurrency(), 5);
        assert_eq!(assembler.pagination, Pagination::SinglePage);

        let content = assembler
            .render_content(&PageId::parse("page").unwrap())
            .await
            .unwrap();
        assert_eq!(content, vec!["<pre class=\"wp-block-code\"><code>x</code></pre>"]);
    }

    #[tokio::test]
    async fn query_is_scoped_to_posts() {
        let repository = Arc::new(StubRepository::default());
        let filter = FilterPredicate::select_equals("Status", "Draft");

        let records = assembler(repository.clone())
            .get_documents(Some(filter), SortSpec::default())
            .await
            .unwrap();

        assert!(records.is_empty());
        let queries = repository.queries.lock().unwrap();
        assert_eq!(
            queries[0]["filter"],
            json!({ "and": [
                { "property": "Type", "select": { "equals": "Post" } },
                { "property": "Status", "select": { "equals": "Draft" } }
            ] })
        );
    }

    #[tokio::test]
    async fn unsupported_blocks_are_left_out() {
        let repository = Arc::new(StubRepository {
            blocks: vec![
                Block::from_value(&json!({ "id": "h", "type": "heading_1", "heading_1": {} })),
                Block::paragraph(block_id("p"), vec![RichTextRun::plain("kept")]),
            ],
            ..Default::default()
        });

        let content = assembler(repository)
            .render_content(&PageId::parse("page").unwrap())
            .await
            .unwrap();
        assert_eq!(content, vec!["<p>kept</p>"]);
    }

    #[tokio::test]
    async fn single_record_uses_page_lookup() {
        let repository = Arc::new(StubRepository {
            blocks: vec![Block::code(block_id("c"), vec![RichTextRun::plain("x=1")])],
            ..Default::default()
        });

        let record = assembler(repository)
            .get_document_record(&PageId::parse("page-9").unwrap())
            .await
            .unwrap();
        assert_eq!(record.id.as_str(), "page-9");
        assert_eq!(record.status, "draft");
        assert_eq!(record.content, vec!["<pre><code>x=1</code></pre>"]);
    }
}
