//! Single-pass inline scanner.
//!
//! Constructs are recognized left to right on the raw text and escaped as they
//! are emitted. Code spans and links are matched as units, so their contents
//! are never touched by emphasis. Inline constructs do not cross line breaks.

use super::{escape_html, push_escaped};

/// Render one block's inline content to HTML.
pub fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        if let Some((html, consumed)) = construct(rest) {
            out.push_str(&html);
            rest = &rest[consumed..];
        } else {
            push_escaped(&mut out, ch);
            rest = &rest[ch.len_utf8()..];
        }
    }
    out
}

fn construct(s: &str) -> Option<(String, usize)> {
    match s.as_bytes().first()? {
        b'`' => code_span(s),
        b'[' => link(s),
        b'*' if s.starts_with("**") => strong(s),
        b'*' => emphasis(s),
        _ => None,
    }
}

fn code_span(s: &str) -> Option<(String, usize)> {
    let len = code_span_len(s)?;
    let inner = &s[1..len - 1];
    Some((format!("<code>{}</code>", escape_html(inner)), len))
}

fn code_span_len(s: &str) -> Option<usize> {
    let close = s[1..].find(['`', '\n'])? + 1;
    (s.as_bytes()[close] == b'`' && close > 1).then_some(close + 1)
}

fn link(s: &str) -> Option<(String, usize)> {
    let (label, target, len) = link_parts(s)?;
    if !is_safe_target(target) {
        return Some((escape_html(&s[..len]), len));
    }
    Some((
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(target),
            render_inline(label)
        ),
        len,
    ))
}

/// `[label](target)` split into its parts plus the total byte length.
fn link_parts(s: &str) -> Option<(&str, &str, usize)> {
    let label_end = s[1..].find([']', '\n'])? + 1;
    if s.as_bytes()[label_end] != b']' || label_end == 1 {
        return None;
    }
    let after = &s[label_end + 1..];
    if !after.starts_with('(') {
        return None;
    }
    let target_len = after[1..].find([')', '\n'])?;
    let target = &after[1..1 + target_len];
    if target.is_empty() || target.contains(char::is_whitespace) {
        return None;
    }
    let len = label_end + 1 + 1 + target_len + 1;
    Some((&s[1..label_end], target, len))
}

fn is_safe_target(target: &str) -> bool {
    match url::Url::parse(target) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https" | "mailto"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

fn strong(s: &str) -> Option<(String, usize)> {
    let close = find_closer(&s[2..], "**")?;
    if close == 0 {
        return None;
    }
    let inner = &s[2..2 + close];
    Some((
        format!("<strong>{}</strong>", render_inline(inner)),
        2 + close + 2,
    ))
}

fn emphasis(s: &str) -> Option<(String, usize)> {
    let close = find_closer(&s[1..], "*")?;
    if close == 0 {
        return None;
    }
    let inner = &s[1..1 + close];
    Some((format!("<em>{}</em>", render_inline(inner)), 1 + close + 1))
}

/// Offset of `delim` in `s`, skipping code spans and links. Stops at a newline.
///
/// When looking for a single `*`, a complete `**...**` run is skipped so bold
/// can nest inside italic.
fn find_closer(s: &str, delim: &str) -> Option<usize> {
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if delim == "*"
            && rest.starts_with("**")
            && let Some(close) = find_closer(&rest[2..], "**")
            && close > 0
        {
            i += 2 + close + 2;
            continue;
        }
        if rest.starts_with(delim) {
            return Some(i);
        }
        let skip = match rest.as_bytes()[0] {
            b'\n' => return None,
            b'`' => code_span_len(rest),
            b'[' => link_parts(rest).map(|(_, _, len)| len),
            _ => None,
        };
        i += skip.unwrap_or_else(|| rest.chars().next().map_or(1, char::len_utf8));
    }
    None
}
