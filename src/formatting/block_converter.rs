// src/formatting/block_converter.rs
//! Turns one Notion block into one HTML fragment.
//!
//! Conversion never fails. Unsupported block types produce no fragment;
//! a paragraph or code block with unreadable rich text produces an empty
//! paragraph and a warning.

use super::rich_text::{convert_rich_text, html_escape};
use crate::constants::{EMPTY_PARAGRAPH_FRAGMENT, GUTENBERG_CODE_CLASS};
use crate::error::MalformedBlockError;
use crate::model::{Block, CodeBlock, ParagraphBlock};
use crate::types::{BlockId, RichTextRun};

/// Converts blocks into Gutenberg-flavored HTML fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockConverter {
    code_class: Option<String>,
}

impl BlockConverter {
    /// Plain markup: `<p>…</p>` and `<pre><code>…</code></pre>`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup carrying Gutenberg's block classes, e.g.
    /// `<pre class="wp-block-code">`.
    pub fn gutenberg() -> Self {
        Self {
            code_class: Some(GUTENBERG_CODE_CLASS.to_string()),
        }
    }

    /// Renders runs as inline HTML.
    pub fn convert_rich_text(&self, runs: &[RichTextRun]) -> String {
        convert_rich_text(runs)
    }

    /// The fragment for `block`, or `None` when its type is unsupported.
    pub fn convert_block(&self, block: &Block) -> Option<String> {
        match block {
            Block::Paragraph(paragraph) => Some(self.convert_paragraph(paragraph)),
            Block::Code(code) => Some(self.convert_code(code)),
            Block::Unsupported(_) => None,
        }
    }

    fn convert_paragraph(&self, block: &ParagraphBlock) -> String {
        match &block.rich_text {
            Some(runs) => format!("<p>{}</p>", self.convert_rich_text(runs)),
            None => malformed(&block.id, "paragraph"),
        }
    }

    fn convert_code(&self, block: &CodeBlock) -> String {
        let Some(runs) = &block.rich_text else {
            return malformed(&block.id, "code");
        };

        let body = self.convert_rich_text(runs);
        match &self.code_class {
            Some(class) => format!(
                "<pre class=\"{}\"><code{}>{}</code></pre>",
                html_escape(class),
                language_attributes(block.language.as_deref()),
                body
            ),
            None => format!("<pre><code>{}</code></pre>", body),
        }
    }
}

/// `lang` and `language-*` attributes for a highlighted code block.
///
/// Notion's "plain text" language means no highlighting.
fn language_attributes(language: Option<&str>) -> String {
    let slug = match language.map(str::trim) {
        Some(lang) if !lang.is_empty() && !lang.eq_ignore_ascii_case("plain text") => {
            html_escape(&lang.to_lowercase().replace(' ', "-"))
        }
        _ => return String::new(),
    };
    format!(" lang=\"{0}\" class=\"language-{0}\"", slug)
}

fn malformed(id: &BlockId, block_type: &'static str) -> String {
    let err = MalformedBlockError {
        block_id: id.to_string(),
        block_type,
        reason: "rich_text is missing or not an array".to_string(),
    };
    log::warn!("{}; emitting an empty paragraph", err);
    EMPTY_PARAGRAPH_FRAGMENT.to_string()
}
