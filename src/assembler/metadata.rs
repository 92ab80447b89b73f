// src/assembler/metadata.rs
//! Reads a document's post metadata out of its Notion properties.
//!
//! Every lookup is optional. A missing or mistyped path falls back to a
//! default and logs a warning naming the document and the path, so one
//! sloppy row never stops a sync.

use crate::constants::DEFAULT_POST_STATUS;
use crate::model::Document;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde_json::Value;

/// Names of the database properties a post record is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Select naming the document kind.
    pub kind: String,
    pub created: String,
    pub modified: String,
    /// Title property; its first run's `plain_text` is the title.
    pub title: String,
    pub status: String,
    /// Multi-select holding category names.
    pub categories: String,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            kind: "Type".to_string(),
            created: "Created time".to_string(),
            modified: "Last edited".to_string(),
            title: "Name".to_string(),
            status: "Status".to_string(),
            categories: "Category".to_string(),
        }
    }
}

/// Everything in a record except its id and content.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordMetadata {
    pub kind: String,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub title: String,
    pub status: String,
    pub categories: IndexSet<String>,
}

/// Extracts [`RecordMetadata`] from `document` using the names in `schema`.
pub fn extract_metadata(document: &Document, schema: &RecordSchema) -> RecordMetadata {
    let reader = PropertyReader { document };

    let kind = reader
        .string(&schema.kind, "/select/name")
        .map(|name| name.to_lowercase())
        .unwrap_or_else(|| {
            reader.missing(&schema.kind, "/select/name", "post");
            "post".to_string()
        });

    let created_at = reader.timestamp(
        &schema.created,
        "/created_time",
        document.created_time.as_deref(),
    );
    let modified_at = reader.timestamp(
        &schema.modified,
        "/last_edited_time",
        document.last_edited_time.as_deref(),
    );

    let title = reader
        .string(&schema.title, "/title/0/plain_text")
        .unwrap_or_else(|| {
            reader.missing(&schema.title, "/title/0/plain_text", "an empty title");
            String::new()
        });

    let status = reader
        .string(&schema.status, "/select/name")
        .unwrap_or_else(|| {
            reader.missing(&schema.status, "/select/name", DEFAULT_POST_STATUS);
            DEFAULT_POST_STATUS.to_string()
        });

    let categories = reader.categories(&schema.categories);

    RecordMetadata {
        kind,
        created_at,
        modified_at,
        title,
        status,
        categories,
    }
}

struct PropertyReader<'a> {
    document: &'a Document,
}

impl<'a> PropertyReader<'a> {
    fn lookup(&self, property: &str, pointer: &str) -> Option<&'a Value> {
        self.document.properties.get(property)?.pointer(pointer)
    }

    fn string(&self, property: &str, pointer: &str) -> Option<String> {
        self.lookup(property, pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn missing(&self, property: &str, pointer: &str, fallback: &str) {
        log::warn!(
            "Document {} has no '{}'{}; using {}",
            self.document.id,
            property,
            pointer,
            fallback
        );
    }

    /// The property's timestamp, else the page's own, else `None`.
    fn timestamp(
        &self,
        property: &str,
        pointer: &str,
        page_value: Option<&str>,
    ) -> Option<DateTime<Utc>> {
        if let Some(raw) = self.lookup(property, pointer).and_then(Value::as_str) {
            if let Some(parsed) = self.parse_timestamp(property, raw) {
                return Some(parsed);
            }
        } else {
            self.missing(property, pointer, "the page timestamp");
        }

        page_value.and_then(|raw| self.parse_timestamp(property, raw))
    }

    fn parse_timestamp(&self, property: &str, raw: &str) -> Option<DateTime<Utc>> {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => Some(parsed.with_timezone(&Utc)),
            Err(e) => {
                log::warn!(
                    "Document {} has an unreadable '{}' timestamp {:?}: {}",
                    self.document.id,
                    property,
                    raw,
                    e
                );
                None
            }
        }
    }

    fn categories(&self, property: &str) -> IndexSet<String> {
        let Some(options) = self
            .lookup(property, "/multi_select")
            .and_then(Value::as_array)
        else {
            self.missing(property, "/multi_select", "no categories");
            return IndexSet::new();
        };

        options
            .iter()
            .filter_map(|option| option.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn document(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn reads_every_property() {
        let doc = document(json!({
            "id": "page-1",
            "properties": {
                "Type": { "select": { "name": "Post" } },
                "Created time": { "created_time": "2024-03-01T10:00:00.000Z" },
                "Last edited": { "last_edited_time": "2024-03-02T11:30:00.000Z" },
                "Name": { "title": [ { "plain_text": "Hello" }, { "plain_text": " world" } ] },
                "Status": { "select": { "name": "publish" } },
                "Category": { "multi_select": [
                    { "name": "rust" }, { "name": "web" }, { "name": "rust" }
                ] }
            }
        }));

        let meta = extract_metadata(&doc, &RecordSchema::default());
        assert_eq!(meta.kind, "post");
        assert_eq!(
            meta.created_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(
            meta.modified_at,
            Some(Utc.with_ymd_and_hms(2024, 3, 2, 11, 30, 0).unwrap())
        );
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.status, "publish");
        assert_eq!(
            meta.categories.into_iter().collect::<Vec<_>>(),
            vec!["rust", "web"]
        );
    }

    #[test]
    fn missing_properties_fall_back_to_defaults() {
        let doc = document(json!({
            "id": "page-2",
            "created_time": "2024-01-05T08:00:00.000Z",
            "properties": {}
        }));

        let meta = extract_metadata(&doc, &RecordSchema::default());
        assert_eq!(meta.kind, "post");
        assert_eq!(
            meta.created_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap())
        );
        assert_eq!(meta.modified_at, None);
        assert_eq!(meta.title, "");
        assert_eq!(meta.status, DEFAULT_POST_STATUS);
        assert!(meta.categories.is_empty());
    }

    #[test]
    fn empty_title_array_is_an_empty_title() {
        let doc = document(json!({
            "id": "page-3",
            "properties": { "Name": { "title": [] } }
        }));
        assert_eq!(extract_metadata(&doc, &RecordSchema::default()).title, "");
    }

    #[test]
    fn unreadable_timestamp_uses_page_value() {
        let doc = document(json!({
            "id": "page-4",
            "last_edited_time": "2024-02-01T00:00:00Z",
            "properties": { "Last edited": { "last_edited_time": "yesterday" } }
        }));
        assert_eq!(
            extract_metadata(&doc, &RecordSchema::default()).modified_at,
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn schema_names_are_honoured() {
        let doc = document(json!({
            "id": "page-5",
            "properties": { "Kind": { "select": { "name": "PAGE" } } }
        }));
        let schema = RecordSchema {
            kind: "Kind".to_string(),
            ..RecordSchema::default()
        };
        assert_eq!(extract_metadata(&doc, &schema).kind, "page");
    }
}
