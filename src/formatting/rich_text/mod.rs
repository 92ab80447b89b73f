// src/formatting/rich_text/mod.rs
//! Formats arrays of rich text runs into inline HTML.

mod annotations;

pub use annotations::{html_escape, HtmlStyleRenderer};

use crate::types::{RichTextRun, ValidatedUrl};

/// Renders runs back to back, with no separator.
pub fn convert_rich_text(runs: &[RichTextRun]) -> String {
    runs.iter().map(convert_run).collect()
}

fn convert_run(run: &RichTextRun) -> String {
    let html = HtmlStyleRenderer::apply_styles(&run.content, &run.annotations);

    let Some(link) = &run.link else {
        return html;
    };

    match ValidatedUrl::parse(link) {
        Ok(url) => HtmlStyleRenderer::apply_link(&html, &url),
        Err(e) => {
            log::warn!("Dropped unsafe link from rich text: {}", e);
            html
        }
    }
}
