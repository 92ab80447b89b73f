// src/pipeline.rs
//! Pipeline capability traits: the two halves of a sync.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::error::AppError;
use crate::model::DocumentRecord;
use crate::output::PublishReport;
use crate::query::DocumentQuery;

/// Produces post records for a query.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_records(&self, query: DocumentQuery) -> Result<Vec<DocumentRecord>, AppError>;
}

/// Hands finished records to the publishing system.
pub trait RecordPublisher {
    fn publish(&self, records: &[DocumentRecord]) -> Result<PublishReport, AppError>;
}
