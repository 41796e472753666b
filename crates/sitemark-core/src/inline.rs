//! Inline tokenizer.
//!
//! A span of text starts life as a single [`FragmentKind::Text`] fragment and
//! is pushed through a fixed pipeline of stages:
//!
//! 1. `**` splits out bold runs
//! 2. `_` splits out italic runs
//! 3. `` ` `` splits out code runs
//! 4. `![alt](url)` spans become images
//! 5. `[text](url)` spans not preceded by `!` become links
//!
//! Each stage only looks at fragments that are still plain text and passes
//! everything else through untouched. Delimiters do not nest and cannot be
//! escaped.

use memchr::{memchr, memchr2};

use crate::ast::{FragmentKind, InlineFragment};
use crate::error::{Error, Result};

/// A paired inline delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `**`
    Bold,
    /// `_`
    Italic,
    /// `` ` ``
    Code,
}

impl Delimiter {
    /// Delimiters in the order the pipeline applies them.
    pub const PIPELINE: [Delimiter; 3] = [Delimiter::Bold, Delimiter::Italic, Delimiter::Code];

    /// The literal delimiter string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Bold => "**",
            Delimiter::Italic => "_",
            Delimiter::Code => "`",
        }
    }

    /// The fragment kind produced for delimited runs.
    pub const fn kind(self) -> FragmentKind {
        match self {
            Delimiter::Bold => FragmentKind::Bold,
            Delimiter::Italic => FragmentKind::Italic,
            Delimiter::Code => FragmentKind::Code,
        }
    }
}

/// Tokenize a span of markdown text into inline fragments.
///
/// # Errors
///
/// Returns [`Error::UnterminatedDelimiter`] if `**`, `_` or `` ` `` appears
/// without a closing partner.
pub fn tokenize_inline(text: &str) -> Result<Vec<InlineFragment>> {
    let fragments = Delimiter::PIPELINE.into_iter().try_fold(
        vec![InlineFragment::text(text)],
        split_delimiter,
    )?;
    let fragments = split_images(fragments);
    Ok(split_links(fragments))
}

/// Split every text fragment on `delimiter`.
///
/// Parts at odd positions take the delimiter's kind, parts at even positions
/// stay text, and empty parts are dropped.
///
/// # Errors
///
/// An even number of parts means a delimiter was left open.
pub fn split_delimiter(
    fragments: Vec<InlineFragment>,
    delimiter: Delimiter,
) -> Result<Vec<InlineFragment>> {
    let marker = delimiter.as_str();
    let kind = delimiter.kind();

    fragments
        .into_iter()
        .try_fold(Vec::new(), |mut out, fragment| {
            if !fragment.is_text() {
                out.push(fragment);
                return Ok(out);
            }

            let parts: Vec<&str> = fragment.content().split(marker).collect();
            if parts.len() % 2 == 0 {
                return Err(Error::unterminated(marker));
            }

            out.extend(
                parts
                    .iter()
                    .enumerate()
                    .filter(|(_, part)| !part.is_empty())
                    .map(|(i, part)| {
                        if i % 2 == 0 {
                            InlineFragment::text(*part)
                        } else {
                            InlineFragment::delimited(kind, part)
                        }
                    }),
            );
            Ok(out)
        })
}

/// Find every `![alt](url)` in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    SpanKind::Image.extract(text)
}

/// Find every `[text](url)` in `text` that is not preceded by `!`.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    SpanKind::Link.extract(text)
}

/// Replace image spans in text fragments with image fragments.
pub fn split_images(fragments: Vec<InlineFragment>) -> Vec<InlineFragment> {
    SpanKind::Image.split(fragments)
}

/// Replace link spans in text fragments with link fragments.
pub fn split_links(fragments: Vec<InlineFragment>) -> Vec<InlineFragment> {
    SpanKind::Link.split(fragments)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Image,
    Link,
}

impl SpanKind {
    fn extract(self, text: &str) -> Vec<(&str, &str)> {
        let bytes = text.as_bytes();
        let mut matches = Vec::new();
        let mut pos = 0;

        while let Some(offset) = memchr(b'[', &bytes[pos..]) {
            let open = pos + offset;

            let preceded_by_bang = open > 0 && bytes[open - 1] == b'!';
            let eligible = match self {
                SpanKind::Image => preceded_by_bang && open > pos,
                SpanKind::Link => !preceded_by_bang,
            };

            match eligible.then(|| scan_bracket_span(bytes, open)).flatten() {
                Some(span) => {
                    let label = &text[span.label.0..span.label.1];
                    let url = &text[span.url.0..span.url.1];
                    matches.push((label, url));
                    pos = span.end;
                }
                None => pos = open + 1,
            }
        }

        matches
    }

    fn literal(self, label: &str, url: &str) -> String {
        match self {
            SpanKind::Image => format!("![{}]({})", label, url),
            SpanKind::Link => format!("[{}]({})", label, url),
        }
    }

    fn fragment(self, label: &str, url: &str) -> InlineFragment {
        match self {
            SpanKind::Image => InlineFragment::image(label, url),
            SpanKind::Link => InlineFragment::link(label, url),
        }
    }

    fn split(self, fragments: Vec<InlineFragment>) -> Vec<InlineFragment> {
        fragments.into_iter().fold(Vec::new(), |mut out, fragment| {
            if !fragment.is_text() {
                out.push(fragment);
                return out;
            }

            // Each match is cut at the first occurrence of its literal in
            // what is left of the text.
            let mut rest = fragment.content();
            for (label, url) in self.extract(rest) {
                let literal = self.literal(label, url);
                let Some((before, after)) = rest.split_once(literal.as_str()) else {
                    break;
                };
                if !before.is_empty() {
                    out.push(InlineFragment::text(before));
                }
                out.push(self.fragment(label, url));
                rest = after;
            }

            if !rest.is_empty() {
                out.push(InlineFragment::text(rest));
            }
            out
        })
    }
}

/// Byte ranges of a `[label](url)` span.
struct BracketSpan {
    label: (usize, usize),
    url: (usize, usize),
    end: usize,
}

/// Match `[label](url)` starting at the `[` at `open`.
///
/// The label may not contain brackets and the url may not contain
/// parentheses.
#[inline]
fn scan_bracket_span(bytes: &[u8], open: usize) -> Option<BracketSpan> {
    let label_start = open + 1;
    let close = label_start + memchr2(b'[', b']', &bytes[label_start..])?;
    if bytes[close] != b']' || bytes.get(close + 1) != Some(&b'(') {
        return None;
    }

    let url_start = close + 2;
    let url_end = url_start + memchr2(b'(', b')', &bytes[url_start..])?;
    if bytes[url_end] != b')' {
        return None;
    }

    Some(BracketSpan {
        label: (label_start, close),
        url: (url_start, url_end),
        end: url_end + 1,
    })
}
