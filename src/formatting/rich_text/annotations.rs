// src/formatting/rich_text/annotations.rs
//! Annotation processing for rich text.
//!
//! Wrappers are applied in a fixed order, each enclosing the ones before
//! it: bold, italic, strikethrough, underline, code. A link wraps last.

use crate::types::{Annotations, ValidatedUrl};

/// Renderer for text styles to HTML.
pub struct HtmlStyleRenderer;

impl HtmlStyleRenderer {
    /// Escapes `content` and wraps it in the tags its annotations ask for.
    pub fn apply_styles(content: &str, annotations: &Annotations) -> String {
        let mut result = html_escape(content);

        if annotations.bold {
            result = format!("<strong>{}</strong>", result);
        }

        if annotations.italic {
            result = format!("<em>{}</em>", result);
        }

        if annotations.strikethrough {
            result = format!("<s>{}</s>", result);
        }

        if annotations.underline {
            result = format!("<u>{}</u>", result);
        }

        if annotations.code {
            result = format!("<code>{}</code>", result);
        }

        result
    }

    /// Wraps already-rendered markup in an anchor to `url`.
    pub fn apply_link(html: &str, url: &ValidatedUrl) -> String {
        format!("<a href=\"{}\">{}</a>", html_escape(url.as_str()), html)
    }
}

/// Basic HTML escaping, safe for both text and attribute values.
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
