// src/output/mod.rs
//! Delivery of synced records to the publishing system.
//!
//! Planning where records go is kept apart from writing them, so the
//! only filesystem and stdout I/O lives in `writer`.

mod types;
mod writer;

pub use types::{PublishReport, PublishTarget};
pub use writer::JsonPublisher;
