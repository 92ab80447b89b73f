// src/model/block.rs
//! Notion blocks, narrowed to the kinds this crate converts.

use crate::types::{BlockId, RichTextRun};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A block from a page's children listing.
///
/// Parsing is total: anything that is not a paragraph or code block
/// becomes [`Block::Unsupported`], and a supported block whose rich text
/// cannot be read keeps `rich_text: None` instead of failing the listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Code(CodeBlock),
    Unsupported(UnsupportedBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphBlock {
    pub id: BlockId,
    /// `None` when the payload had no usable `rich_text` array.
    pub rich_text: Option<Vec<RichTextRun>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub id: BlockId,
    pub rich_text: Option<Vec<RichTextRun>>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedBlock {
    pub id: BlockId,
    /// The `type` string Notion sent, e.g. `heading_1`.
    pub block_type: String,
}

impl Block {
    /// Reads a block from its raw JSON form.
    pub fn from_value(value: &Value) -> Self {
        let id = BlockId::from_normalized(
            value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        );
        let block_type = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match block_type {
            "paragraph" => Block::Paragraph(ParagraphBlock {
                id,
                rich_text: read_rich_text(value, "paragraph"),
            }),
            "code" => Block::Code(CodeBlock {
                id,
                rich_text: read_rich_text(value, "code"),
                language: value
                    .pointer("/code/language")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            other => Block::Unsupported(UnsupportedBlock {
                id,
                block_type: other.to_string(),
            }),
        }
    }

    pub fn id(&self) -> &BlockId {
        match self {
            Block::Paragraph(b) => &b.id,
            Block::Code(b) => &b.id,
            Block::Unsupported(b) => &b.id,
        }
    }

    /// The Notion `type` string of the block.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Code(_) => "code",
            Block::Unsupported(b) => &b.block_type,
        }
    }

    /// Shorthand for a well-formed paragraph.
    pub fn paragraph(id: BlockId, rich_text: Vec<RichTextRun>) -> Self {
        Block::Paragraph(ParagraphBlock {
            id,
            rich_text: Some(rich_text),
        })
    }

    /// Shorthand for a well-formed code block without a language.
    pub fn code(id: BlockId, rich_text: Vec<RichTextRun>) -> Self {
        Block::Code(CodeBlock {
            id,
            rich_text: Some(rich_text),
            language: None,
        })
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Block::from_value(&value))
    }
}

/// `payload.rich_text` as runs, or `None` if it is absent, not an array,
/// or holds an element that is not a rich text object.
fn read_rich_text(value: &Value, payload_key: &str) -> Option<Vec<RichTextRun>> {
    let items = value.get(payload_key)?.get("rich_text")?.as_array()?;
    items
        .iter()
        .map(RichTextRun::deserialize)
        .collect::<Result<Vec<_>, _>>()
        .ok()
}
