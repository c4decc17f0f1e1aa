//! Plain-text views of store state for the terminal.

use super::style;
use crate::chat::{ChatSettings, ChatStore, Conversation, Message, Notice, Role};
use crate::markdown::{self, Segment};
use std::fmt::Write;

const ID_PREFIX_LEN: usize = 8;

/// Numbered conversation list, most recently updated first.
pub fn conversation_list(store: &ChatStore) -> String {
    let active = store.active_id();
    let mut out = String::new();
    for (index, conversation) in store.conversations().into_iter().enumerate() {
        let marker = if Some(conversation.id.as_str()) == active {
            style::header("*")
        } else {
            " ".to_string()
        };
        let _ = writeln!(
            out,
            "{marker} {:>2}. {}  {}",
            index + 1,
            conversation.title,
            style::dim(format!(
                "{} · {} messages · {}",
                short_id(&conversation.id),
                conversation.messages.len(),
                conversation.updated_at.format("%Y-%m-%d %H:%M")
            )),
        );
    }
    out
}

pub fn settings_summary(settings: &ChatSettings) -> String {
    let api_key = if settings.api_key.is_empty() {
        style::error("not set")
    } else {
        style::value("set")
    };
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", style::cyan("endpoint:     "), style::value(&settings.endpoint));
    let _ = writeln!(out, "{} {api_key}", style::cyan("api key:      "));
    let _ = writeln!(out, "{} {}", style::cyan("model:        "), style::value(&settings.model));
    let _ = writeln!(out, "{} {}", style::cyan("temperature:  "), style::value(settings.temperature));
    let _ = writeln!(out, "{} {}", style::cyan("max tokens:   "), style::value(settings.max_tokens));
    let _ = writeln!(out, "{} {}", style::cyan("system prompt:"), settings.system_prompt);
    out
}

pub fn message(message: &Message) -> String {
    let body = match message.role {
        Role::Assistant => render_markdown(&message.content),
        Role::Error => style::error(&message.content),
        Role::User | Role::System => message.content.clone(),
    };
    format!("{} {}", style::role_label(message.role), body)
}

pub fn transcript(conversation: &Conversation) -> String {
    let mut out = format!("{}\n", style::header(&conversation.title));
    if conversation.messages.is_empty() {
        let _ = writeln!(out, "{}", style::dim("(no messages yet)"));
    }
    for entry in &conversation.messages {
        let _ = writeln!(out, "{}\n", message(entry));
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    if notice.is_error() {
        style::error(notice)
    } else {
        style::success(notice)
    }
}

/// Markdown formatted for a terminal: prose as written, code blocks framed.
pub fn render_markdown(text: &str) -> String {
    markdown::render(text)
        .iter()
        .map(|segment| match segment {
            Segment::Text { source, .. } => source.trim_matches('\n').to_string(),
            Segment::Code(block) => {
                let mut framed = style::dim(format!("── {} ──", block.label()));
                for line in block.content.lines() {
                    framed.push('\n');
                    framed.push_str(&style::code(line));
                }
                framed
            }
            Segment::Empty => style::dim("(no content)"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn short_id(id: &str) -> &str {
    id.get(..ID_PREFIX_LEN).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ApiKey;

    #[test]
    fn settings_summary_never_prints_the_key() {
        let settings = ChatSettings {
            endpoint: "https://api.example.com".into(),
            api_key: ApiKey::new("sk-very-secret"),
            model: "m".into(),
            temperature: 0.5,
            max_tokens: 10,
            system_prompt: "p".into(),
        };
        let summary = settings_summary(&settings);
        assert!(!summary.contains("sk-very-secret"));
        assert!(summary.contains("https://api.example.com"));
    }

    #[test]
    fn code_blocks_are_framed_with_their_label() {
        let rendered = render_markdown("intro\n```rust\nfn main() {}\n```");
        assert!(rendered.contains("intro"));
        assert!(rendered.contains("── rust ──"));
        assert!(rendered.contains("fn main() {}"));
    }

    #[test]
    fn short_id_handles_short_input() {
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id("0123456789"), "01234567");
    }
}
