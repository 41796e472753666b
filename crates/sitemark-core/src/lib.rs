//! # Sitemark Core
//!
//! The markdown compiler behind the sitemark static-site generator.
//!
//! A document is segmented into blocks, each block is classified and compiled
//! into an HTML node, and the resulting tree is serialized to a string.
//!
//! ## Quick Start
//!
//! ```rust
//! use sitemark_core::compile_document;
//!
//! let root = compile_document("# Hello\n\nSome **bold** text.").unwrap();
//! assert_eq!(
//!     root.render().unwrap(),
//!     "<div><h1>Hello</h1><p>Some <b>bold</b> text.</p></div>"
//! );
//! ```
//!
//! ## Supported syntax
//!
//! - Blocks: `#`..`######` headings, fenced code, `>` quotes, `- ` lists,
//!   `1. ` numbered lists, paragraphs
//! - Inline: `**bold**`, `_italic_`, `` `code` ``, `[text](url)`,
//!   `![alt](url)`
//!
//! Inline delimiters do not nest, and no HTML escaping is performed on text
//! or attribute values.

pub mod ast;
pub mod block;
pub mod compiler;
pub mod error;
pub mod inline;
pub mod node;

pub use ast::{BlockKind, FragmentKind, HeadingLevel, InlineFragment};
pub use block::{classify_block, segment_blocks};
pub use compiler::{compile_block, compile_document};
pub use error::{Error, ErrorKind, Result, StructuralError};
pub use inline::tokenize_inline;
pub use node::{Attributes, LeafNode, Node, ParentNode};
