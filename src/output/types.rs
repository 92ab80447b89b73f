// src/output/types.rs
//! Type definitions for publishing operations.

use std::fmt;
use std::path::PathBuf;

/// Where a batch of records is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishTarget {
    /// Write the JSON document to a file, creating parent directories
    File(PathBuf),
    /// Print the JSON document to stdout
    Stdout,
}

impl fmt::Display for PublishTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishTarget::File(path) => write!(f, "{}", path.display()),
            PublishTarget::Stdout => write!(f, "stdout"),
        }
    }
}

/// Result of publishing one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub target: PublishTarget,
    pub records_published: usize,
    pub bytes_written: usize,
    pub duration_ms: u64,
}
