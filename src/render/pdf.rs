//! Document back-end: maps the parsed blocks onto a paginated flow
//! document and renders it to PDF bytes. Unlike the display back-end,
//! list items stay standalone bulleted paragraphs (no grouping) and blank
//! lines become fixed-height spacers.

use super::inline::{InlineSpan, SpanStyle};
use super::{parse_blocks, Block};
use crate::error::RenderError;
use chrono::{DateTime, Utc};
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{self, FontData, FontFamily};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{Alignment, Document, SimplePageDecorator};

const TITLE: &str = "AI Research Report";
const TITLE_SIZE: u8 = 20;
const BODY_SIZE: u8 = 10;
const LINK_COLOR: Color = Color::Rgb(59, 130, 246);

/// Font directories probed in order; the flow target needs real font files.
const FONT_CANDIDATES: &[(&str, &str)] = &[
    ("/usr/share/fonts/truetype/liberation", "LiberationSans"),
    ("/usr/share/fonts/liberation", "LiberationSans"),
    ("/usr/share/fonts/truetype/liberation2", "LiberationSans"),
    ("/System/Library/Fonts", "Helvetica"),
    ("/Library/Fonts", "Arial"),
];

/// Renders the held report into a complete PDF: title page header, query
/// and timestamp metadata, a spacer, then one flow element per body line.
pub fn render_pdf(
    query: &str,
    report: &str,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::new(load_font_family()?);
    doc.set_title(TITLE);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(20);
    doc.set_page_decorator(decorator);

    doc.push(
        Paragraph::new(StyledString::new(
            TITLE,
            Style::new().bold().with_font_size(TITLE_SIZE),
        ))
        .aligned(Alignment::Center),
    );
    doc.push(Break::new(1.0));
    doc.push(metadata_line("Query: ", query));
    doc.push(metadata_line(
        "Generated: ",
        &generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ));
    doc.push(Break::new(1.5));

    for block in parse_blocks(report) {
        match block {
            Block::Blank => doc.push(Break::new(0.5)),
            Block::Heading { level, spans } => {
                doc.push(Break::new(0.5));
                doc.push(flow_paragraph(&spans, heading_style(level), None));
            }
            Block::Paragraph { spans } => {
                doc.push(flow_paragraph(&spans, Style::new().with_font_size(BODY_SIZE), None));
            }
            Block::ListItem { spans } => {
                // each bullet is its own paragraph; the document target does
                // not group list runs
                doc.push(flow_paragraph(
                    &spans,
                    Style::new().with_font_size(BODY_SIZE),
                    Some("\u{2022} "),
                ));
            }
        }
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;
    Ok(bytes)
}

fn load_font_family() -> Result<FontFamily<FontData>, RenderError> {
    for (dir, name) in FONT_CANDIDATES {
        if let Ok(family) = fonts::from_files(dir, name, None) {
            return Ok(family);
        }
    }
    Err(RenderError::FontUnavailable)
}

fn metadata_line(label: &str, value: &str) -> Paragraph {
    let mut paragraph = Paragraph::default();
    paragraph.push(StyledString::new(
        label,
        Style::new().bold().with_font_size(BODY_SIZE),
    ));
    paragraph.push(StyledString::new(
        value,
        Style::new().with_font_size(BODY_SIZE),
    ));
    paragraph
}

fn heading_style(level: u8) -> Style {
    let size = match level {
        1 => 16,
        2 => 14,
        _ => 12,
    };
    Style::new().bold().with_font_size(size)
}

/// One flow paragraph from a block's spans, merging the block's base style
/// with each span's emphasis. Link spans render as colored URL text; the
/// flow target has no hyperlink primitive.
fn flow_paragraph(spans: &[InlineSpan], base: Style, bullet: Option<&str>) -> Paragraph {
    let mut paragraph = Paragraph::default();
    if let Some(marker) = bullet {
        paragraph.push(StyledString::new(marker, base));
    }
    for span in spans {
        paragraph.push(span_string(span, base));
    }
    paragraph
}

fn span_string(span: &InlineSpan, base: Style) -> StyledString {
    let mut style = base;
    match span.style {
        SpanStyle::Plain => {}
        SpanStyle::Bold => style = style.bold(),
        SpanStyle::Italic => style = style.italic(),
    }
    if span.link.is_some() {
        style = style.with_color(LINK_COLOR);
    }
    StyledString::new(span.text.clone(), style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::inline;

    #[test]
    fn heading_styles_shrink_with_depth() {
        assert!(heading_style(1).font_size() > heading_style(2).font_size());
        assert!(heading_style(2).font_size() > heading_style(3).font_size());
        assert!(heading_style(1).is_bold());
    }

    #[test]
    fn span_styles_merge_onto_the_block_style() {
        let spans = inline::parse_spans("**bold** and *lean*");
        let styled: Vec<StyledString> = spans
            .iter()
            .map(|s| span_string(s, Style::new().with_font_size(BODY_SIZE)))
            .collect();
        assert!(styled[0].style.is_bold());
        assert_eq!(styled[0].s, "bold");
        assert!(styled[2].style.is_italic());
        assert_eq!(styled[2].s, "lean");
    }

    #[test]
    fn link_spans_are_colored() {
        let spans = inline::parse_spans("https://x.test/p");
        let styled = span_string(&spans[0], Style::new());
        assert_eq!(styled.style.color(), Some(LINK_COLOR));
    }
}
