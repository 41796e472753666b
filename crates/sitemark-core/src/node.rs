//! HTML node tree and its serializer.
//!
//! A [`Node`] is either a leaf carrying a value or a parent carrying child
//! nodes. Rendering walks the tree depth-first and writes tags, attributes
//! and values into one output buffer. Values are written verbatim: no HTML
//! entity escaping is performed.

use crate::error::{Result, StructuralError};

/// Ordered attribute list with unique keys.
///
/// Insertion order is kept for serialization; equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set `key` to `value`. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as ` key="value" key2="value2"`, or `""` when empty.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in &self.entries {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Attributes {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// Node holding a value and no children.
///
/// Without a tag the value is emitted as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    /// Element tag; `None` renders the bare value.
    pub tag: Option<String>,
    /// Element content. Must be set before rendering.
    pub value: Option<String>,
    /// Element attributes.
    pub attrs: Attributes,
}

/// Node holding an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentNode {
    /// Element tag. Must be set before rendering.
    pub tag: Option<String>,
    /// Child nodes in document order. Must be non-empty before rendering.
    pub children: Vec<Node>,
    /// Element attributes.
    pub attrs: Attributes,
}

/// An element of the output HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal node with a value.
    Leaf(LeafNode),
    /// Container node with children.
    Parent(ParentNode),
}

impl Node {
    /// Tagged leaf, e.g. `<b>value</b>`.
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attrs: Attributes::new(),
        })
    }

    /// Untagged leaf rendered as raw text.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf(LeafNode {
            tag: None,
            value: Some(value.into()),
            attrs: Attributes::new(),
        })
    }

    /// Tagged container.
    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent(ParentNode {
            tag: Some(tag.into()),
            children,
            attrs: Attributes::new(),
        })
    }

    /// Add or replace an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs_mut().insert(key, value);
        self
    }

    /// The element tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag.as_deref(),
            Node::Parent(parent) => parent.tag.as_deref(),
        }
    }

    /// The node attributes.
    pub fn attrs(&self) -> &Attributes {
        match self {
            Node::Leaf(leaf) => &leaf.attrs,
            Node::Parent(parent) => &parent.attrs,
        }
    }

    fn attrs_mut(&mut self) -> &mut Attributes {
        match self {
            Node::Leaf(leaf) => &mut leaf.attrs,
            Node::Parent(parent) => &mut parent.attrs,
        }
    }

    /// Children of a parent node; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => &parent.children,
        }
    }

    /// Serialize the subtree to HTML.
    ///
    /// # Errors
    ///
    /// Returns a structural error if any node in the subtree is a leaf
    /// without a value, or a parent without a tag or without children.
    pub fn render(&self) -> Result<String> {
        let mut out = String::with_capacity(256);
        self.render_into(&mut out)?;
        Ok(out)
    }

    /// Serialize the subtree, appending to `out`.
    ///
    /// On error `out` may hold a partial rendering.
    pub fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf(leaf) => {
                let value = leaf.value.as_deref().ok_or(StructuralError::MissingValue)?;
                match leaf.tag.as_deref() {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(out, tag, &leaf.attrs);
                        out.push_str(value);
                        close_tag(out, tag);
                    }
                }
            }
            Node::Parent(parent) => {
                let tag = parent.tag.as_deref().ok_or(StructuralError::MissingTag)?;
                if parent.children.is_empty() {
                    return Err(StructuralError::NoChildren {
                        tag: tag.to_string(),
                    }
                    .into());
                }
                open_tag(out, tag, &parent.attrs);
                for child in &parent.children {
                    child.render_into(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

#[inline]
fn open_tag(out: &mut String, tag: &str, attrs: &Attributes) {
    out.push('<');
    out.push_str(tag);
    attrs.write_html(out);
    out.push('>');
}

#[inline]
fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
