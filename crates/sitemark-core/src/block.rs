//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines, i.e. at every run of two or
//! more consecutive newlines. Each block is then classified by looking at its
//! first characters or at the start of each of its lines.
//!
//! Segmentation uses `memchr` to find newline runs, so blocks borrow
//! directly from the input.

use memchr::memchr;

use crate::ast::{BlockKind, HeadingLevel};

/// Opening and closing marker of a code block.
pub const FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks.
///
/// Blank lines are runs of two or more `\n`; lines holding only spaces do
/// not separate blocks.
pub fn segment_blocks(document: &str) -> Vec<&str> {
    let document = document.trim();
    if document.is_empty() {
        return Vec::new();
    }

    let bytes = document.as_bytes();
    let mut blocks = Vec::with_capacity(16);
    let mut start = 0;
    let mut pos = 0;

    while let Some(offset) = memchr(b'\n', &bytes[pos..]) {
        let newline = pos + offset;
        let run_end = newline + bytes[newline..].iter().take_while(|&&b| b == b'\n').count();

        if run_end - newline >= 2 {
            push_trimmed(&mut blocks, &document[start..newline]);
            start = run_end;
        }
        pos = run_end;
    }

    push_trimmed(&mut blocks, &document[start..]);
    blocks
}

#[inline(always)]
fn push_trimmed<'a>(blocks: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        blocks.push(piece);
    }
}

/// Classify a block. The first matching rule wins:
///
/// 1. heading: 1 to 6 `#` followed by a space
/// 2. code: opens and closes with a fence
/// 3. quote: every line starts with `>`
/// 4. unordered list: every line starts with `- `
/// 5. ordered list: line `n` starts with `n. `, counting from 1
/// 6. paragraph
pub fn classify_block(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }

    if is_code(block) {
        return BlockKind::Code;
    }

    if block.split('\n').all(|line| line.starts_with('>')) {
        return BlockKind::Quote;
    }

    if block.split('\n').all(|line| line.starts_with("- ")) {
        return BlockKind::UnorderedList;
    }

    if is_ordered_list(block) {
        return BlockKind::OrderedList;
    }

    BlockKind::Paragraph
}

/// Heading level of a block starting with `#`..`######` and a space.
pub fn heading_level(block: &str) -> Option<HeadingLevel> {
    let bytes = block.as_bytes();
    let hashes = bytes.iter().take_while(|&&b| b == b'#').count();

    if hashes == 0 || hashes > 6 || bytes.get(hashes) != Some(&b' ') {
        return None;
    }
    HeadingLevel::new(hashes as u8)
}

#[inline]
fn is_code(block: &str) -> bool {
    block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE)
}

/// The `"{n}. "` marker expected on line `index` (0-based) of an ordered list.
#[inline]
pub fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i)))
}
