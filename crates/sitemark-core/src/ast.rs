//! Intermediate types produced between the raw markdown and the node tree.
//!
//! - [`InlineFragment`]: a typed run of inline content (text, bold, ...)
//! - [`BlockKind`]: the classification of a top-level block
//!
//! Both are closed enumerations so that every consumer matches exhaustively.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Kind of an inline fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// Plain text.
    Text,
    /// Strong text (`**bold**`).
    Bold,
    /// Emphasized text (`_italic_`).
    Italic,
    /// Inline code (`` `code` ``).
    Code,
    /// Hyperlink (`[text](url)`).
    Link,
    /// Image (`![alt](url)`).
    Image,
}

impl FragmentKind {
    /// All kinds in tokenizer order.
    pub const ALL: [FragmentKind; 6] = [
        FragmentKind::Text,
        FragmentKind::Bold,
        FragmentKind::Italic,
        FragmentKind::Code,
        FragmentKind::Link,
        FragmentKind::Image,
    ];

    /// Lowercase label for the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            FragmentKind::Text => "text",
            FragmentKind::Bold => "bold",
            FragmentKind::Italic => "italic",
            FragmentKind::Code => "code",
            FragmentKind::Link => "link",
            FragmentKind::Image => "image",
        }
    }

    /// Whether fragments of this kind carry a URL target.
    pub const fn has_target(self) -> bool {
        matches!(self, FragmentKind::Link | FragmentKind::Image)
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FragmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FragmentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownFragmentKind(s.to_string()))
    }
}

/// A typed unit of inline content.
///
/// `target` is present exactly when the kind is [`FragmentKind::Link`] or
/// [`FragmentKind::Image`]; the constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineFragment {
    kind: FragmentKind,
    content: String,
    target: Option<String>,
}

impl InlineFragment {
    fn plain(kind: FragmentKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            target: None,
        }
    }

    /// Plain text fragment.
    pub fn text(content: impl Into<String>) -> Self {
        Self::plain(FragmentKind::Text, content)
    }

    /// Bold fragment.
    pub fn bold(content: impl Into<String>) -> Self {
        Self::plain(FragmentKind::Bold, content)
    }

    /// Italic fragment.
    pub fn italic(content: impl Into<String>) -> Self {
        Self::plain(FragmentKind::Italic, content)
    }

    /// Inline code fragment.
    pub fn code(content: impl Into<String>) -> Self {
        Self::plain(FragmentKind::Code, content)
    }

    /// Link fragment with display text and destination.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Link,
            content: text.into(),
            target: Some(url.into()),
        }
    }

    /// Image fragment with alt text and source.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: FragmentKind::Image,
            content: alt.into(),
            target: Some(url.into()),
        }
    }

    /// Build a fragment of a target-less kind from a delimiter split.
    ///
    /// Link and image kinds are only produced by the span extractors, so
    /// they are not accepted here.
    pub(crate) fn delimited(kind: FragmentKind, content: &str) -> Self {
        debug_assert!(!kind.has_target());
        Self::plain(kind, content)
    }

    /// The fragment kind.
    #[inline]
    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Display text (link text or image alt for targeted kinds).
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// URL for links and images.
    #[inline]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether this fragment is still unprocessed text.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == FragmentKind::Text
    }
}

/// Heading level, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Create a level, returning `None` outside `1..=6`.
    pub const fn new(level: u8) -> Option<Self> {
        if level >= 1 && level <= 6 {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Numeric level.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The `h1`..`h6` tag for this level.
    pub const fn tag(self) -> &'static str {
        match self.0 {
            1 => "h1",
            2 => "h2",
            3 => "h3",
            4 => "h4",
            5 => "h5",
            _ => "h6",
        }
    }

    /// The `"# "`..`"###### "` marker for this level.
    pub const fn marker(self) -> &'static str {
        match self.0 {
            1 => "# ",
            2 => "## ",
            3 => "### ",
            4 => "#### ",
            5 => "##### ",
            _ => "###### ",
        }
    }
}

/// Classification of a top-level block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `#`..`######` heading.
    Heading(HeadingLevel),
    /// Fenced code block.
    Code,
    /// Block quotation (every line starts with `>`).
    Quote,
    /// Bulleted list (every line starts with `- `).
    UnorderedList,
    /// Numbered list (`1. `, `2. `, ... in sequence).
    OrderedList,
    /// Anything else.
    Paragraph,
}

impl BlockKind {
    /// Short label, used by tooling output.
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Heading(_) => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
            BlockKind::Paragraph => "paragraph",
        }
    }
}
