// src/types/rich_text.rs
//! Rich text runs as they arrive inside Notion blocks.

use serde::{Deserialize, Serialize};

/// Formatting flags on a run. Missing flags read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
}

/// A styled span of text with an optional link target.
///
/// `content` is raw text straight from Notion; it must be escaped before
/// it is placed in markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "WireRichText")]
pub struct RichTextRun {
    pub content: String,
    pub annotations: Annotations,
    pub link: Option<String>,
}

impl RichTextRun {
    /// An unstyled run with no link.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(url.into());
        self
    }
}

// Notion's wire shape: `{ "type": "text", "text": { "content", "link": { "url" } },
// "annotations": {...}, "plain_text": ... }`. Mentions and equations carry no
// `text` object, so their `plain_text` stands in for the content.
#[derive(Deserialize)]
struct WireRichText {
    #[serde(default)]
    text: Option<WireText>,
    #[serde(default)]
    plain_text: Option<String>,
    #[serde(default)]
    annotations: Option<Annotations>,
}

#[derive(Deserialize)]
struct WireText {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    link: Option<WireLink>,
}

#[derive(Deserialize)]
struct WireLink {
    #[serde(default)]
    url: Option<String>,
}

impl From<WireRichText> for RichTextRun {
    fn from(wire: WireRichText) -> Self {
        let (content, link) = match wire.text {
            Some(text) => (
                text.content.or(wire.plain_text).unwrap_or_default(),
                text.link.and_then(|l| l.url).filter(|url| !url.is_empty()),
            ),
            None => (wire.plain_text.unwrap_or_default(), None),
        };

        Self {
            content,
            annotations: wire.annotations.unwrap_or_default(),
            link,
        }
    }
}
