// src/model/document.rs
//! Pages returned by a database query, and the records derived from them.

use crate::types::PageId;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page as Notion returns it.
///
/// Properties stay as raw JSON; the assembler reads the few it needs
/// through defaulting lookups so a missing property never fails a sync.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub id: PageId,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// One post, ready for the publishing system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub id: PageId,
    /// Lower-cased value of the document's type select, e.g. `post`.
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub title: String,
    pub status: String,
    pub categories: IndexSet<String>,
    /// One markup fragment per converted block, in block order.
    pub content: Vec<String>,
}
