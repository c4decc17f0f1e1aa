use chatkra::markdown::{CodeBlock, Segment, render, render_html, to_html};

#[test]
fn bold_and_inline_code() {
    let html = render_html("**bold** and `code`");
    assert!(html.contains("<strong>bold</strong>"));
    assert!(html.contains("<code>code</code>"));
}

#[test]
fn python_fence_yields_one_code_segment() {
    assert_eq!(
        render("```python\nprint(1)\n```"),
        vec![Segment::Code(CodeBlock {
            language: "python".into(),
            content: "print(1)\n".into(),
        })]
    );
}

#[test]
fn typical_assistant_reply() {
    let reply = "\
## Steps

1. Install the toolchain
2. Run `cargo new demo`

```bash
cargo run
```

Read [the book](https://doc.rust-lang.org/book/) for *more*.";

    let segments = render(reply);
    assert_eq!(segments.len(), 3);

    let html = to_html(&segments);
    assert!(html.starts_with("<h2>Steps</h2>\n<ol>\n<li>Install the toolchain</li>"));
    assert!(html.contains("<li>Run <code>cargo new demo</code></li>\n</ol>"));
    assert!(html.contains("<pre><code class=\"language-bash\">cargo run\n</code></pre>"));
    assert!(html.contains(
        "<a href=\"https://doc.rust-lang.org/book/\" target=\"_blank\" rel=\"noopener noreferrer\">the book</a>"
    ));
    assert!(html.contains("<em>more</em>"));
}

#[test]
fn script_tags_are_escaped_everywhere() {
    let html = render_html("<script>alert(1)</script>\n\n- <b>x</b>\n\n```\n<script>\n```");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn link_targets_keep_asterisks_and_unsafe_schemes_stay_text() {
    let html = render_html("[a](https://example.com/**x**) and [b](javascript:void)");
    assert!(html.contains("href=\"https://example.com/**x**\""));
    assert!(!html.contains("<strong>x</strong>"));
    assert!(!html.contains("href=\"javascript"));
    assert!(html.contains("[b](javascript:void)"));
}

#[test]
fn blank_reply_uses_placeholder() {
    assert_eq!(render_html("\n\n   "), "<p><em>No content</em></p>");
}

#[test]
fn unknown_language_keeps_label_but_highlights_as_plaintext() {
    let segments = render("```Zig\nconst x = 1;\n```");
    let Segment::Code(block) = &segments[0] else {
        panic!("expected a code segment");
    };
    assert_eq!(block.label(), "Zig");
    assert_eq!(block.highlight_language(), "plaintext");
}
