//! Inline styling passes. Three independent substitutions run in a fixed
//! order over a block's text: bold (`**…**`, shortest span), then italic
//! (`*…*`, never re-reading the asterisks the bold pass consumed), then
//! URL auto-linking. Later passes operate on the spans the earlier passes
//! produced, so a URL inside a bold span stays bold and the link scopes to
//! exactly the URL text. Unmatched delimiters pass through literally.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s<>"{}|\\^\[\]]+"#).expect("URL pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Bold,
    Italic,
}

/// A run of text carrying at most one emphasis style and optionally a link
/// target. Styles never nest; an italic range crossing a bold span splits
/// around it instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub style: SpanStyle,
    pub link: Option<String>,
}

impl InlineSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, SpanStyle::Plain)
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
            link: None,
        }
    }
}

/// Runs the three passes in order.
pub fn parse_spans(text: &str) -> Vec<InlineSpan> {
    link_pass(italic_pass(bold_pass(text)))
}

/// Splits out `**…**` ranges, matching the shortest possible span. A `**`
/// with no closing pair stays literal.
fn bold_pass(text: &str) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        match rest[open + 2..].find("**") {
            Some(rel) => {
                let close = open + 2 + rel;
                if open > 0 {
                    spans.push(InlineSpan::plain(&rest[..open]));
                }
                spans.push(InlineSpan::styled(&rest[open + 2..close], SpanStyle::Bold));
                rest = &rest[close + 2..];
            }
            None => break,
        }
    }

    if !rest.is_empty() {
        spans.push(InlineSpan::plain(rest));
    }
    spans
}

/// Matches `*…*` over the bold pass's output. The delimiters must be single
/// asterisks (a neighbour asterisk disqualifies them, mirroring the
/// lookaround the substitution is defined with) and the content must be
/// asterisk-free. An italic range may cross a bold span, in which case the
/// plain stretches around it become italic and the bold span is untouched.
fn italic_pass(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    let mut out: Vec<InlineSpan> = Vec::new();
    let mut queue: VecDeque<InlineSpan> = spans.into();

    'spans: while let Some(span) = queue.pop_front() {
        if span.style != SpanStyle::Plain {
            out.push(span);
            continue;
        }

        let bytes = span.text.as_bytes();
        let mut open = 0;
        while open < bytes.len() {
            // asterisks are ASCII, so byte scanning is UTF-8 safe
            if bytes[open] != b'*' || (open > 0 && bytes[open - 1] == b'*') {
                open += 1;
                continue;
            }

            let tail = &span.text[open + 1..];
            if let Some(rel) = tail.find('*') {
                // closing candidate inside the same span; the shortest match
                // wins, so this is the only candidate for this opening
                let close = open + 1 + rel;
                let non_empty = rel > 0;
                let lone_close = close + 1 >= bytes.len() || bytes[close + 1] != b'*';
                if non_empty && lone_close {
                    if open > 0 {
                        out.push(InlineSpan::plain(&span.text[..open]));
                    }
                    out.push(InlineSpan::styled(
                        &span.text[open + 1..close],
                        SpanStyle::Italic,
                    ));
                    let rest = span.text[close + 1..].to_string();
                    if !rest.is_empty() {
                        queue.push_front(InlineSpan::plain(rest));
                    }
                    continue 'spans;
                }
                open += 1;
                continue;
            }

            // no closing asterisk left in this span; the range may close in
            // a later plain span as long as nothing in between contains one
            if let Some((skip, offset)) = forward_close(&queue) {
                if open > 0 {
                    out.push(InlineSpan::plain(&span.text[..open]));
                }
                if !tail.is_empty() {
                    out.push(InlineSpan::styled(tail, SpanStyle::Italic));
                }
                for _ in 0..skip {
                    if let Some(mid) = queue.pop_front() {
                        out.push(match mid.style {
                            SpanStyle::Plain => {
                                InlineSpan::styled(mid.text, SpanStyle::Italic)
                            }
                            _ => mid,
                        });
                    }
                }
                if let Some(closing) = queue.pop_front() {
                    if offset > 0 {
                        out.push(InlineSpan::styled(
                            &closing.text[..offset],
                            SpanStyle::Italic,
                        ));
                    }
                    let rest = closing.text[offset + 1..].to_string();
                    if !rest.is_empty() {
                        queue.push_front(InlineSpan::plain(rest));
                    }
                }
                continue 'spans;
            }

            open += 1;
        }

        out.push(span);
    }

    out
}

/// Finds the first asterisk in the queued spans. Valid as a closing
/// delimiter only when it sits in a plain span and is not immediately
/// followed by another asterisk.
fn forward_close(queue: &VecDeque<InlineSpan>) -> Option<(usize, usize)> {
    for (idx, span) in queue.iter().enumerate() {
        if let Some(offset) = span.text.find('*') {
            if span.style != SpanStyle::Plain {
                return None;
            }
            let bytes = span.text.as_bytes();
            if offset + 1 < bytes.len() && bytes[offset + 1] == b'*' {
                return None;
            }
            return Some((idx, offset));
        }
    }
    None
}

/// Splits spans around URL matches. The matched part keeps the span's
/// emphasis style and gains a link target equal to its own text.
fn link_pass(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    let mut out = Vec::new();
    for span in spans {
        let mut last = 0;
        for m in URL_RE.find_iter(&span.text) {
            if m.start() > last {
                out.push(InlineSpan::styled(&span.text[last..m.start()], span.style));
            }
            out.push(InlineSpan {
                text: m.as_str().to_string(),
                style: span.style,
                link: Some(m.as_str().to_string()),
            });
            last = m.end();
        }
        if last == 0 {
            out.push(span);
        } else if last < span.text.len() {
            out.push(InlineSpan::styled(&span.text[last..], span.style));
        }
    }
    out
}
