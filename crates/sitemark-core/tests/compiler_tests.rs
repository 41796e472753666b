//! Integration tests for the sitemark compiler

use pretty_assertions::assert_eq;
use sitemark_core::{
    classify_block, compile_block, compile_document, segment_blocks, tokenize_inline, BlockKind,
    Error, ErrorKind, FragmentKind, HeadingLevel, InlineFragment, Node,
};

fn render(document: &str) -> String {
    compile_document(document)
        .and_then(|root| root.render())
        .unwrap()
}

// ============================================================================
// Inline Tokenizer Tests
// ============================================================================

#[test]
fn test_plain_text_is_one_fragment() {
    for text in ["hello", "a sentence, with punctuation.", "  spaced  ", "100% (ok)"] {
        assert_eq!(
            tokenize_inline(text).unwrap(),
            vec![InlineFragment::text(text)]
        );
    }
}

#[test]
fn test_bold_surrounding_text_omitted_when_empty() {
    assert_eq!(
        tokenize_inline("**bold**").unwrap(),
        vec![InlineFragment::bold("bold")]
    );
    assert_eq!(
        tokenize_inline("x **bold**").unwrap(),
        vec![InlineFragment::text("x "), InlineFragment::bold("bold")]
    );
    assert_eq!(
        tokenize_inline("**bold** x").unwrap(),
        vec![InlineFragment::bold("bold"), InlineFragment::text(" x")]
    );
}

#[test]
fn test_unterminated_delimiters() {
    for (text, delimiter) in [("a ** b", "**"), ("an _open", "_"), ("`x` and `y", "`")] {
        let err = tokenize_inline(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedDelimiter);
        assert_eq!(err, Error::UnterminatedDelimiter { delimiter });
    }
}

#[test]
fn test_link_and_image_side_by_side() {
    let fragments = tokenize_inline("![logo](/logo.png)[home](/)").unwrap();
    assert_eq!(
        fragments,
        vec![
            InlineFragment::image("logo", "/logo.png"),
            InlineFragment::link("home", "/"),
        ]
    );
    assert!(fragments
        .iter()
        .all(|f| f.target().is_some() == f.kind().has_target()));
}

#[test]
fn test_code_span_claims_link_syntax() {
    assert_eq!(
        tokenize_inline("see `[a](b)`").unwrap(),
        vec![InlineFragment::text("see "), InlineFragment::code("[a](b)")]
    );
}

// ============================================================================
// Segmentation and Classification Tests
// ============================================================================

#[test]
fn test_segment_examples() {
    assert_eq!(segment_blocks("A\n\nB\n\n\nC"), vec!["A", "B", "C"]);
    assert_eq!(segment_blocks("   \n\n  "), Vec::<&str>::new());
}

#[test]
fn test_classify_examples() {
    assert_eq!(
        classify_block("# Title"),
        BlockKind::Heading(HeadingLevel::new(1).unwrap())
    );
    assert_eq!(classify_block("####### x"), BlockKind::Paragraph);
    assert_eq!(classify_block("1. a\n3. b"), BlockKind::Paragraph);
}

#[test]
fn test_classify_every_block_of_a_document() {
    let doc = "# Title\n\n```\nfn main() {}\n```\n\n> quoted\n\n- a\n- b\n\n1. x\n2. y\n\nplain";
    let kinds: Vec<&str> = segment_blocks(doc)
        .into_iter()
        .map(|block| classify_block(block).label())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "heading",
            "code",
            "quote",
            "unordered_list",
            "ordered_list",
            "paragraph"
        ]
    );
}

// ============================================================================
// Block Compilation Tests
// ============================================================================

#[test]
fn test_compile_block_matches_classification() {
    let block = "- **one**\n- [two](/2)";
    let node = compile_block(block, classify_block(block)).unwrap();
    assert_eq!(
        node,
        Node::parent(
            "ul",
            vec![
                Node::parent("li", vec![Node::leaf("b", "one")]),
                Node::parent(
                    "li",
                    vec![Node::leaf("a", "two").with_attr("href", "/2")]
                ),
            ]
        )
    );
}

#[test]
fn test_compile_every_heading_level() {
    for level in 1..=6u8 {
        let block = format!("{} Title", "#".repeat(level as usize));
        let html = render(&block);
        assert_eq!(html, format!("<div><h{0}>Title</h{0}></div>", level));
    }
}

#[test]
fn test_unknown_fragment_kind_label() {
    let err = "underline".parse::<FragmentKind>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownFragmentKind);
    assert_eq!(err.to_string(), "unknown fragment kind: underline");
}

// ============================================================================
// End-to-End Tests
// ============================================================================

#[test]
fn test_heading_and_paragraph() {
    assert_eq!(
        render("# Heading\n\nSome **bold** text."),
        "<div><h1>Heading</h1><p>Some <b>bold</b> text.</p></div>"
    );
}

#[test]
fn test_code_block_is_literal() {
    assert_eq!(
        render("```\ncode _here_\n```"),
        "<div><pre><code>code _here_\n</code></pre></div>"
    );
}

#[test]
fn test_paragraphs() {
    let md = "\nThis is **bolded** paragraph\ntext in a p\ntag here\n\nThis is another paragraph with _italic_ text and `code` here\n\n";
    assert_eq!(
        render(md),
        "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
    );
}

#[test]
fn test_quote() {
    let md = "> This is a\n> blockquote block\n\nthis is paragraph text\n";
    assert_eq!(
        render(md),
        "<div><blockquote><p>This is a blockquote block</p></blockquote><p>this is paragraph text</p></div>"
    );
}

#[test]
fn test_lists() {
    let md = "- This is a list\n- with items\n- and _more_ items\n\n1. This is an `ordered` list\n2. with items\n3. and more items\n";
    assert_eq!(
        render(md),
        "<div><ul><li>This is a list</li><li>with items</li><li>and <i>more</i> items</li></ul><ol><li>This is an <code>ordered</code> list</li><li>with items</li><li>and more items</li></ol></div>"
    );
}

#[test]
fn test_links_and_images() {
    let md = "Visit [the docs](/docs) or see ![a diagram](/img/d.png).";
    assert_eq!(
        render(md),
        r#"<div><p>Visit <a href="/docs">the docs</a> or see <img src="/img/d.png" alt="a diagram"></img>.</p></div>"#
    );
}

#[test]
fn test_raw_html_is_not_escaped() {
    assert_eq!(render("1 < 2 & 3 > 2"), "<div><p>1 < 2 & 3 > 2</p></div>");
}

#[test]
fn test_error_aborts_whole_document() {
    let err = compile_document("# fine\n\nbroken `span\n\nfine again").unwrap_err();
    assert_eq!(err, Error::UnterminatedDelimiter { delimiter: "`" });
}

// ============================================================================
// Determinism Tests
// ============================================================================

/// Small linear congruential generator so the corpus is reproducible.
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u32() as usize) % items.len()]
    }
}

const SEED: u64 = 0x5eed;

const PIECES: &[&str] = &[
    "# Title",
    "## Section",
    "plain words",
    "**bold** words",
    "_italic_",
    "`code`",
    "[link](/x)",
    "![img](/y.png)",
    "> quoted",
    "- item",
    "1. first",
    "```\nlet a = 1;\n```",
    "dangling **",
    "\n",
    "\n\n",
];

fn generate(rng: &mut Lcg) -> String {
    let count = 1 + (rng.next_u32() % 12) as usize;
    (0..count).map(|_| rng.choose(PIECES)).collect::<Vec<_>>().join("\n")
}

#[test]
fn test_rendering_is_deterministic() {
    let mut rng = Lcg::new(SEED);
    for _ in 0..200 {
        let doc = generate(&mut rng);
        let first = compile_document(&doc).and_then(|root| root.render());
        let second = compile_document(&doc).and_then(|root| root.render());
        assert_eq!(first, second, "document: {:?}", doc);

        if let Ok(html) = first {
            assert!(html.starts_with("<div>") && html.ends_with("</div>"));
        }
    }
}
