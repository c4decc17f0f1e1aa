//! Lightweight markdown rendering for assistant replies.
//!
//! [`render`] splits a reply into fenced code blocks and formatted text
//! segments. Text segments go through a block pass (headings, lists,
//! paragraphs) and then a single inline scanner.

pub mod blocks;
pub mod code;
pub mod inline;

pub use blocks::render_blocks;
pub use code::{CodeBlock, DEFAULT_LANGUAGE, HIGHLIGHT_LANGUAGES};
pub use inline::render_inline;

use regex::Regex;
use std::sync::LazyLock;

/// HTML for empty or whitespace-only input.
pub const EMPTY_PLACEHOLDER_HTML: &str = "<p><em>No content</em></p>";

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_+#.-]*)\n(.*?)```").expect("valid fence pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Formatted prose. `source` is the raw markdown span.
    Text { source: String, html: String },
    Code(CodeBlock),
    /// The whole input was blank.
    Empty,
}

impl Segment {
    pub fn to_html(&self) -> String {
        match self {
            Self::Text { html, .. } => html.clone(),
            Self::Code(block) => block.to_html(),
            Self::Empty => EMPTY_PLACEHOLDER_HTML.to_string(),
        }
    }
}

/// Split `text` into code and text segments.
///
/// Spans between fences that contain only whitespace are dropped.
pub fn render(text: &str) -> Vec<Segment> {
    if text.trim().is_empty() {
        return vec![Segment::Empty];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    for caps in FENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut segments, &text[last..whole.start()]);
        let language = caps.get(1).map_or("", |m| m.as_str());
        let content = caps.get(2).map_or("", |m| m.as_str());
        segments.push(Segment::Code(CodeBlock::new(language, content)));
        last = whole.end();
    }
    push_text(&mut segments, &text[last..]);
    segments
}

fn push_text(segments: &mut Vec<Segment>, source: &str) {
    if source.trim().is_empty() {
        return;
    }
    segments.push(Segment::Text {
        source: source.to_string(),
        html: render_blocks(source),
    });
}

/// Render `text` straight to an HTML fragment.
pub fn render_html(text: &str) -> String {
    to_html(&render(text))
}

pub fn to_html(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape `&`, `<`, `>` and `"`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

pub(crate) fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(ch),
    }
}
