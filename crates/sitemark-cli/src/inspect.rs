//! Block listing for the `inspect` command.

use serde::Serialize;
use sitemark_core::{classify_block, compile_block, segment_blocks, BlockKind};

use crate::error::CliError;

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct JsonDocument<'a> {
    pub blocks: Vec<JsonBlock<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JsonBlock<'a> {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub lines: usize,
    pub source: &'a str,
    pub html: String,
}

/// Segment, classify and compile every block of `input`.
pub(crate) fn inspect(input: &str) -> Result<JsonDocument<'_>, sitemark_core::Error> {
    let blocks = segment_blocks(input)
        .into_iter()
        .map(convert_block)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(JsonDocument { blocks })
}

fn convert_block(source: &str) -> Result<JsonBlock<'_>, sitemark_core::Error> {
    let kind = classify_block(source);
    let html = compile_block(source, kind)?.render()?;
    Ok(JsonBlock {
        kind: kind.label(),
        level: match kind {
            BlockKind::Heading(level) => Some(level.get()),
            _ => None,
        },
        lines: source.lines().count(),
        source,
        html,
    })
}

pub(crate) fn to_json(doc: &JsonDocument<'_>) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

// =============================================================================
// Text Output
// =============================================================================

pub(crate) fn to_text(doc: &JsonDocument<'_>) -> String {
    let mut out = format!("Blocks: {}\n", doc.blocks.len());
    for (i, block) in doc.blocks.iter().enumerate() {
        out.push_str(&format!("  [{}] {}\n", i + 1, describe_block(block)));
        out.push_str(&format!("      {}\n", block.html));
    }
    out
}

fn describe_block(block: &JsonBlock<'_>) -> String {
    match block.level {
        Some(level) => format!("{} (level {}, {} lines)", block.kind, level, block.lines),
        None => format!("{} ({} lines)", block.kind, block.lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inspect_blocks() {
        let doc = inspect("## Intro\n\n- a\n- b").unwrap();
        assert_eq!(doc.blocks.len(), 2);

        assert_eq!(doc.blocks[0].kind, "heading");
        assert_eq!(doc.blocks[0].level, Some(2));
        assert_eq!(doc.blocks[0].html, "<h2>Intro</h2>");

        assert_eq!(doc.blocks[1].kind, "unordered_list");
        assert_eq!(doc.blocks[1].level, None);
        assert_eq!(doc.blocks[1].lines, 2);
        assert_eq!(doc.blocks[1].html, "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_inspect_propagates_errors() {
        assert!(inspect("fine\n\nnot `fine").is_err());
    }

    #[test]
    fn test_json_output() {
        let doc = inspect("text").unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "blocks": [{
                    "kind": "paragraph",
                    "lines": 1,
                    "source": "text",
                    "html": "<p>text</p>"
                }]
            })
        );
    }

    #[test]
    fn test_text_output() {
        let doc = inspect("# Title").unwrap();
        assert_eq!(
            to_text(&doc),
            "Blocks: 1\n  [1] heading (level 1, 1 lines)\n      <h1>Title</h1>\n"
        );
    }
}
