// src/output/writer.rs
//! Writes records as JSON by performing actual I/O.
//!
//! This module is the only place where file I/O operations occur,
//! keeping the rest of the codebase pure and testable.

use super::types::{PublishReport, PublishTarget};
use crate::error::AppError;
use crate::model::DocumentRecord;
use crate::pipeline::RecordPublisher;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Publishes records as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonPublisher {
    target: PublishTarget,
}

impl JsonPublisher {
    pub fn new(target: PublishTarget) -> Self {
        Self { target }
    }

    /// Stdout unless `path` is given.
    pub fn for_output(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(PublishTarget::File(path.to_path_buf())),
            None => Self::new(PublishTarget::Stdout),
        }
    }

    pub fn target(&self) -> &PublishTarget {
        &self.target
    }
}

impl RecordPublisher for JsonPublisher {
    fn publish(&self, records: &[DocumentRecord]) -> Result<PublishReport, AppError> {
        let start_time = Instant::now();
        let mut content = serde_json::to_string_pretty(records)?;
        content.push('\n');

        let bytes_written = match &self.target {
            PublishTarget::File(path) => write_file(path, &content)?,
            PublishTarget::Stdout => print_to_stdout(&content)?,
        };

        let report = PublishReport {
            target: self.target.clone(),
            records_published: records.len(),
            bytes_written,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };
        log::info!(
            "Published {} record(s) to {} ({} bytes in {}ms)",
            report.records_published,
            report.target,
            report.bytes_written,
            report.duration_ms
        );
        Ok(report)
    }
}

/// Writes content to a file.
fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;
    Ok(content.len())
}

/// Prints content to stdout.
fn print_to_stdout(content: &str) -> Result<usize, AppError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PageId;
    use indexmap::IndexSet;

    fn record(id: &str) -> DocumentRecord {
        DocumentRecord {
            id: PageId::parse(id).unwrap(),
            kind: "post".to_string(),
            created_at: None,
            modified_at: None,
            title: "Hello".to_string(),
            status: "draft".to_string(),
            categories: IndexSet::from(["rust".to_string()]),
            content: vec!["<p>Hi</p>".to_string()],
        }
    }

    #[test]
    fn writes_records_to_file() {
        let dir = std::env::temp_dir().join(format!("notion2gutenberg_test_{}", std::process::id()));
        let path = dir.join("nested").join("records.json");

        let publisher = JsonPublisher::for_output(Some(&path));
        let report = publisher.publish(&[record("a"), record("b")]).unwrap();

        assert_eq!(report.records_published, 2);
        assert_eq!(report.target, PublishTarget::File(path.clone()));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[1]["id"], "b");
        assert_eq!(written[0]["type"], "post");
        assert_eq!(written[0]["createdAt"], serde_json::Value::Null);
        assert_eq!(written[0]["categories"][0], "rust");
        assert_eq!(written[0]["content"][0], "<p>Hi</p>");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn defaults_to_stdout() {
        assert_eq!(JsonPublisher::for_output(None).target(), &PublishTarget::Stdout);
    }
}
