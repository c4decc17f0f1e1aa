use super::escape_html;

/// Language recorded for fences that carry no tag.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Languages the highlighter understands. Anything else is shown as plain text.
pub const HIGHLIGHT_LANGUAGES: &[&str] = &[
    "markup",
    "html",
    "xml",
    "css",
    "javascript",
    "typescript",
    "jsx",
    "tsx",
    "json",
    "python",
    "java",
    "c",
    "cpp",
    "csharp",
    "bash",
    "sql",
    "php",
    "go",
    "dart",
    "rust",
    "kotlin",
    "swift",
    "ruby",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub content: String,
}

impl CodeBlock {
    /// Build from a fence match; an empty tag becomes [`DEFAULT_LANGUAGE`].
    pub fn new(language: &str, content: impl Into<String>) -> Self {
        let language = if language.is_empty() {
            DEFAULT_LANGUAGE
        } else {
            language
        };
        Self {
            language: language.to_string(),
            content: content.into(),
        }
    }

    /// Header text for the block: the tag as written, `plaintext` when untagged.
    pub fn label(&self) -> &str {
        &self.language
    }

    pub fn highlight_language(&self) -> String {
        let lowered = self.language.to_ascii_lowercase();
        if HIGHLIGHT_LANGUAGES.contains(&lowered.as_str()) {
            lowered
        } else {
            DEFAULT_LANGUAGE.to_string()
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            self.highlight_language(),
            escape_html(&self.content)
        )
    }
}
