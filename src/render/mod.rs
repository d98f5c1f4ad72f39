//! Markup renderer: parses the constrained markdown subset the report
//! pipeline emits and re-renders it for two targets — inline-styled HTML
//! for display and a flow document for paginated PDF output.
//!
//! Both back-ends share one parsing discipline: lines are trimmed and
//! classified into typed blocks, then the block text goes through the
//! fixed bold → italic → link inline passes in [`inline`].

pub mod html;
pub mod inline;
pub mod pdf;

use inline::InlineSpan;

/// One structural unit of a rendered report, in source line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<InlineSpan> },
    Paragraph { spans: Vec<InlineSpan> },
    ListItem { spans: Vec<InlineSpan> },
    /// An empty source line. Dropped by the display back-end, rendered as a
    /// fixed spacer by the document back-end.
    Blank,
}

/// Splits the input into trimmed lines and classifies each one. Heading
/// prefixes are checked longest-first so `### ` never reads as `# `.
pub fn parse_blocks(input: &str) -> Vec<Block> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    input
        .lines()
        .map(|raw| {
            let line = raw.trim();
            if line.is_empty() {
                Block::Blank
            } else if let Some(rest) = line.strip_prefix("### ") {
                Block::Heading {
                    level: 3,
                    spans: inline::parse_spans(rest),
                }
            } else if let Some(rest) = line.strip_prefix("## ") {
                Block::Heading {
                    level: 2,
                    spans: inline::parse_spans(rest),
                }
            } else if let Some(rest) = line.strip_prefix("# ") {
                Block::Heading {
                    level: 1,
                    spans: inline::parse_spans(rest),
                }
            } else if let Some(rest) = line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
            {
                Block::ListItem {
                    spans: inline::parse_spans(rest.trim()),
                }
            } else {
                Block::Paragraph {
                    spans: inline::parse_spans(line),
                }
            }
        })
        .collect()
}
