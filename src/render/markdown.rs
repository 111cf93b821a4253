//! HTML body conversion
//!
//! Item bodies arrive as the small HTML subset the Hacker News API emits:
//! paragraphs opened with a bare `<p>`, links, italics, and `<pre><code>`
//! blocks. This module turns them into markdown-flavoured plain text.

use crate::ConversionError;
use scraper::{ElementRef, Html, Node};

/// Converts raw item markup into the destination text format
///
/// Implementations are shared by every concurrent fetch, so they must be
/// stateless or internally synchronised.
pub trait TextRenderer: Send + Sync {
    fn convert(&self, raw: &str) -> Result<String, ConversionError>;
}

/// Converts item HTML into markdown
///
/// # Conversion Rules
///
/// | Markup | Output |
/// |--------|--------|
/// | `<p>` | blank line between paragraphs |
/// | `<a href>` | `[text](href)`, or the bare URL when the text is the URL |
/// | `<i>`, `<em>` | `*text*` |
/// | `<b>`, `<strong>` | `**text**` |
/// | `<pre>` | every line indented by four spaces |
/// | `<code>` (inline) | `` `text` `` |
/// | `<br>` | newline |
///
/// Entities are decoded and any other tag is rendered as its content.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer {
    strict: bool,
}

impl MarkdownRenderer {
    /// Creates a renderer; with `strict` set, markup the parser had to repair
    /// is reported as `ConversionError::Malformed` instead of being accepted
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

impl TextRenderer for MarkdownRenderer {
    fn convert(&self, raw: &str) -> Result<String, ConversionError> {
        if raw.trim().is_empty() {
            return Ok(String::new());
        }

        let fragment = Html::parse_fragment(raw);

        if self.strict && !fragment.errors.is_empty() {
            let messages: Vec<String> = fragment.errors.iter().map(|e| e.to_string()).collect();
            return Err(ConversionError::Malformed(messages.join("; ")));
        }

        let mut out = String::new();
        write_children(fragment.root_element(), &mut out);

        Ok(out.trim_end().trim_start_matches('\n').to_string())
    }
}

/// Writes the converted content of every child of `element`
fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    write_element(child_element, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    match element.value().name() {
        "p" => {
            paragraph_break(out);
            write_children(element, out);
        }
        "pre" => {
            paragraph_break(out);
            let code: String = element.text().collect();
            let lines: Vec<String> = code
                .trim_end_matches('\n')
                .lines()
                .map(|line| format!("    {}", line))
                .collect();
            out.push_str(&lines.join("\n"));
            paragraph_break(out);
        }
        "a" => write_link(element, out),
        "i" | "em" => write_wrapped(element, "*", out),
        "b" | "strong" => write_wrapped(element, "**", out),
        "code" => write_wrapped(element, "`", out),
        "br" => out.push('\n'),
        _ => write_children(element, out),
    }
}

fn write_link(element: ElementRef<'_>, out: &mut String) {
    let mut text = String::new();
    write_children(element, &mut text);

    let Some(href) = element.value().attr("href") else {
        out.push_str(&text);
        return;
    };

    // Long URLs are shown truncated with "..." as the link text
    let shown = text.trim().trim_end_matches("...");
    if shown.is_empty() || href.starts_with(shown) {
        out.push_str(href);
    } else {
        out.push_str(&format!("[{}]({})", text.trim(), href));
    }
}

fn write_wrapped(element: ElementRef<'_>, marker: &str, out: &mut String) {
    let mut inner = String::new();
    write_children(element, &mut inner);
    if inner.trim().is_empty() {
        out.push_str(&inner);
        return;
    }
    out.push_str(marker);
    out.push_str(&inner);
    out.push_str(marker);
}

/// Ends the current paragraph: trailing blanks collapse into one empty line
fn paragraph_break(out: &mut String) {
    if out.is_empty() {
        return;
    }
    let kept = out.trim_end_matches([' ', '\n']).len();
    out.truncate(kept);
    out.push_str("\n\n");
}
