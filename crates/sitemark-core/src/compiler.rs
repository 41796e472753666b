//! Block and document compilation into node trees.

use crate::ast::{BlockKind, FragmentKind, HeadingLevel, InlineFragment};
use crate::block::{classify_block, ordered_marker, segment_blocks, FENCE};
use crate::error::Result;
use crate::inline::tokenize_inline;
use crate::node::Node;

/// Tag of the root node produced by [`compile_document`].
pub const ROOT_TAG: &str = "div";

/// Map one inline fragment to its node.
///
/// | kind   | tag    | value   | attributes          |
/// |--------|--------|---------|---------------------|
/// | text   | none   | content |                     |
/// | bold   | `b`    | content |                     |
/// | italic | `i`    | content |                     |
/// | code   | `code` | content |                     |
/// | link   | `a`    | content | `href`              |
/// | image  | `img`  | `""`    | `src`, `alt`        |
pub fn fragment_to_node(fragment: &InlineFragment) -> Node {
    let content = fragment.content();
    let target = fragment.target().unwrap_or_default();

    match fragment.kind() {
        FragmentKind::Text => Node::text(content),
        FragmentKind::Bold => Node::leaf("b", content),
        FragmentKind::Italic => Node::leaf("i", content),
        FragmentKind::Code => Node::leaf("code", content),
        FragmentKind::Link => Node::leaf("a", content).with_attr("href", target),
        FragmentKind::Image => Node::leaf("img", "")
            .with_attr("src", target)
            .with_attr("alt", content),
    }
}

/// Tokenize `text` and map each fragment to a node.
pub fn text_to_children(text: &str) -> Result<Vec<Node>> {
    Ok(tokenize_inline(text)?
        .iter()
        .map(fragment_to_node)
        .collect())
}

/// Compile a classified block into a single node.
///
/// A block whose text does not actually carry the structure `kind` asks for
/// (a heading without its marker, for instance) is compiled as a paragraph.
pub fn compile_block(block: &str, kind: BlockKind) -> Result<Node> {
    match kind {
        BlockKind::Heading(level) => compile_heading(block, level),
        BlockKind::Code => Ok(compile_code(block)),
        BlockKind::Quote => compile_quote(block),
        BlockKind::UnorderedList => compile_unordered_list(block),
        BlockKind::OrderedList => compile_ordered_list(block),
        BlockKind::Paragraph => compile_paragraph(block),
    }
}

/// Compile a whole markdown document into a `div` rooted tree.
///
/// # Errors
///
/// Propagates tokenizer errors from any block. A document without blocks
/// yields a root with no children, which fails later at render time.
pub fn compile_document(document: &str) -> Result<Node> {
    let children = segment_blocks(document)
        .into_iter()
        .map(|block| compile_block(block, classify_block(block)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent(ROOT_TAG, children))
}

fn compile_heading(block: &str, level: HeadingLevel) -> Result<Node> {
    match block.strip_prefix(level.marker()) {
        Some(text) => Ok(Node::parent(level.tag(), text_to_children(text)?)),
        None => compile_paragraph(block),
    }
}

fn compile_code(block: &str) -> Node {
    let body = block
        .strip_prefix("```\n")
        .or_else(|| block.strip_prefix(FENCE))
        .unwrap_or(block);
    let body = body.strip_suffix(FENCE).unwrap_or(body);

    let code = fragment_to_node(&InlineFragment::code(body));
    Node::parent("pre", vec![code])
}

fn compile_quote(block: &str) -> Result<Node> {
    let text = block
        .split('\n')
        .map(|line| {
            line.strip_prefix("> ")
                .or_else(|| line.strip_prefix('>'))
                .unwrap_or(line)
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let paragraph = Node::parent("p", text_to_children(&text)?);
    Ok(Node::parent("blockquote", vec![paragraph]))
}

fn compile_unordered_list(block: &str) -> Result<Node> {
    let items = block
        .split('\n')
        .map(|line| -> Result<Node> {
            let text = line.strip_prefix("- ").unwrap_or(line);
            Ok(Node::parent("li", text_to_children(text)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent("ul", items))
}

fn compile_ordered_list(block: &str) -> Result<Node> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| -> Result<Node> {
            let marker = ordered_marker(i);
            let text = line.strip_prefix(marker.as_str()).unwrap_or(line);
            Ok(Node::parent("li", text_to_children(text)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Node::parent("ol", items))
}

fn compile_paragraph(block: &str) -> Result<Node> {
    let text = block.replace('\n', " ");
    Ok(Node::parent("p", text_to_children(&text)?))
}
