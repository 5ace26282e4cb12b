//! Markdown to HTML tree conversion for static pages.
//!
//! This crate implements a deliberately small markdown grammar:
//! headings, fenced code, quotes, flat lists and paragraphs at the block
//! level, and bold, italic, code, links and images inline.
//!
//! # Architecture
//!
//! Conversion runs in two stages:
//! - [`markdown_to_blocks`] splits a document on blank lines and
//!   [`block_to_block_type`] classifies each block.
//! - [`markdown_to_html_node`] assembles every block into an [`HtmlNode`]
//!   subtree, running the inline tokenizer ([`text_to_textnodes`]) over the
//!   textual content of each block.
//!
//! The resulting tree is rendered with [`HtmlNode::render`].
//!
//! # Example
//!
//! ```
//! use mdpress_markdown::markdown_to_html_node;
//!
//! let root = markdown_to_html_node("# Hello\n\nSome **bold** text").unwrap();
//! assert_eq!(
//!     root.render(),
//!     "<div><h1>Hello</h1><p>Some <b>bold</b> text</p></div>"
//! );
//! ```

mod block;
mod document;
mod error;
mod html;
mod inline;
mod text_node;

pub use block::{BlockType, block_to_block_type, markdown_to_blocks};
pub use document::markdown_to_html_node;
pub use error::MarkdownError;
pub use html::{Attributes, HtmlError, HtmlNode, text_node_to_html_node};
pub use inline::{
    extract_images, extract_links, split_nodes_delimiter, split_nodes_image, split_nodes_link,
    text_to_textnodes,
};
pub use text_node::{TextKind, TextNode};
