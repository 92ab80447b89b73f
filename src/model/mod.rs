// src/model/mod.rs
//! Domain model: blocks, query predicates, and documents.

mod block;
mod document;
mod filter;

pub use block::{Block, CodeBlock, ParagraphBlock, UnsupportedBlock};
pub use document::{Document, DocumentRecord};
pub use filter::{FilterPredicate, SortSpec};
