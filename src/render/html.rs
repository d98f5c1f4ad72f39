//! Display back-end: emits one inline-styled HTML element per block and
//! wraps every run of consecutive list items in a single `<ul>`. Blank
//! lines are dropped entirely; they neither emit an element nor break a
//! list run.

use super::inline::{InlineSpan, SpanStyle};
use super::{parse_blocks, Block};

const H1_STYLE: &str = "color: #1e40af; margin-top: 2.5rem; margin-bottom: 1.5rem; \
     padding-bottom: 0.5rem; border-bottom: 3px solid #3b82f6;";
const H2_STYLE: &str = "color: #1e40af; margin-top: 2rem; margin-bottom: 1rem; \
     padding-bottom: 0.3rem; border-bottom: 2px solid #e2e8f0;";
const H3_STYLE: &str = "color: #374151; margin-top: 1.5rem; margin-bottom: 0.8rem;";
const PARAGRAPH_STYLE: &str = "margin-bottom: 1rem; line-height: 1.6;";
const ITEM_STYLE: &str = "margin-bottom: 0.5rem;";
const LIST_STYLE: &str = "margin-bottom: 1.5rem; padding-left: 1.5rem;";
const LINK_STYLE: &str = "color: #3b82f6; text-decoration: underline;";

/// Renders the report for screen display.
pub fn render_display(report: &str) -> String {
    let mut elements: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for block in parse_blocks(report) {
        match block {
            Block::Blank => {}
            Block::ListItem { spans } => {
                items.push(format!(
                    "<li style=\"{ITEM_STYLE}\">{}</li>",
                    spans_to_html(&spans)
                ));
            }
            Block::Heading { level, spans } => {
                flush_list(&mut elements, &mut items);
                elements.push(heading(level, &spans));
            }
            Block::Paragraph { spans } => {
                flush_list(&mut elements, &mut items);
                elements.push(format!(
                    "<p style=\"{PARAGRAPH_STYLE}\">{}</p>",
                    spans_to_html(&spans)
                ));
            }
        }
    }
    flush_list(&mut elements, &mut items);

    elements.join("\n")
}

/// Closes the current run of list items into one list container.
fn flush_list(elements: &mut Vec<String>, items: &mut Vec<String>) {
    if items.is_empty() {
        return;
    }
    elements.push(format!(
        "<ul style=\"{LIST_STYLE}\">{}</ul>",
        items.join("\n")
    ));
    items.clear();
}

fn heading(level: u8, spans: &[InlineSpan]) -> String {
    let (tag, style) = match level {
        1 => ("h1", H1_STYLE),
        2 => ("h2", H2_STYLE),
        _ => ("h3", H3_STYLE),
    };
    format!("<{tag} style=\"{style}\">{}</{tag}>", spans_to_html(spans))
}

fn spans_to_html(spans: &[InlineSpan]) -> String {
    spans.iter().map(span_to_html).collect()
}

fn span_to_html(span: &InlineSpan) -> String {
    let text = escape(&span.text);
    // the anchor sits inside the emphasis tag, so a URL in a bold range
    // renders as a bold link
    let inner = match &span.link {
        Some(url) => format!(
            "<a href=\"{url}\" target=\"_blank\" style=\"{LINK_STYLE}\">{text}</a>"
        ),
        None => text,
    };
    match span.style {
        SpanStyle::Plain => inner,
        SpanStyle::Bold => format!("<strong>{inner}</strong>"),
        SpanStyle::Italic => format!("<em>{inner}</em>"),
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
