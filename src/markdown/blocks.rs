use super::inline::render_inline;
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.*)$").expect("valid heading pattern"));
static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s(.*)$").expect("valid list pattern"));
static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s(.*)$").expect("valid list pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
enum Block<'a> {
    Paragraph(Vec<&'a str>),
    List { ordered: bool, items: Vec<&'a str> },
    Heading { level: usize, text: &'a str },
}

enum Line<'a> {
    Blank,
    Heading(usize, &'a str),
    Item { ordered: bool, text: &'a str },
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }
    if let Some(caps) = HEADING.captures(line) {
        let level = caps.get(1).map_or(1, |m| m.len());
        let text = caps.get(2).map_or("", |m| m.as_str());
        return Line::Heading(level, text);
    }
    if let Some(text) = UNORDERED_ITEM.captures(line).and_then(|c| c.get(1)) {
        return Line::Item {
            ordered: false,
            text: text.as_str(),
        };
    }
    if let Some(text) = ORDERED_ITEM.captures(line).and_then(|c| c.get(1)) {
        return Line::Item {
            ordered: true,
            text: text.as_str(),
        };
    }
    Line::Text(line)
}

fn parse_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for raw in text.lines() {
        match classify(raw) {
            Line::Blank => blocks.extend(current.take()),
            Line::Heading(level, text) => {
                blocks.extend(current.take());
                blocks.push(Block::Heading { level, text });
            }
            Line::Item { ordered, text } => match current.as_mut() {
                Some(Block::List {
                    ordered: open,
                    items,
                }) if *open == ordered => items.push(text),
                _ => {
                    blocks.extend(current.take());
                    current = Some(Block::List {
                        ordered,
                        items: vec![text],
                    });
                }
            },
            Line::Text(line) => match current.as_mut() {
                Some(Block::Paragraph(lines)) => lines.push(line),
                _ => {
                    blocks.extend(current.take());
                    current = Some(Block::Paragraph(vec![line]));
                }
            },
        }
    }
    blocks.extend(current);
    blocks
}

/// Render a fence-free span of markdown to HTML.
pub fn render_blocks(text: &str) -> String {
    parse_blocks(text)
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &Block<'_>) -> String {
    match block {
        Block::Paragraph(lines) => {
            let body: Vec<String> = lines.iter().map(|line| render_inline(line)).collect();
            format!("<p>{}</p>", body.join("\n"))
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let mut html = format!("<{tag}>\n");
            for item in items {
                html.push_str("<li>");
                html.push_str(&render_inline(item));
                html.push_str("</li>\n");
            }
            html.push_str(&format!("</{tag}>"));
            html
        }
        Block::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", render_inline(text))
        }
    }
}
