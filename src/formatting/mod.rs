// src/formatting/mod.rs
//! Converts Notion blocks and rich text into HTML fragments.

pub mod block_converter;
pub mod rich_text;

pub use block_converter::BlockConverter;
pub use rich_text::{convert_rich_text, html_escape};
