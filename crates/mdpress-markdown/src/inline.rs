//! Inline tokenizer.
//!
//! Splits an inline string into [`TextNode`]s with a fixed sequence of passes:
//! images, links, then the `**`, `_` and `` ` `` delimiters. Each pass only
//! splits nodes that are still [`TextKind::Plain`]; nodes typed by an earlier
//! pass are carried through untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::MarkdownError;
use crate::text_node::{TextKind, TextNode};

/// `![alt](url)` with no nested brackets or parentheses.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// `[label](url)`, optionally preceded by `!` so image markup can be
/// recognized and skipped (the regex crate has no lookbehind).
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Delimiter passes in application order.
const DELIMITER_PASSES: [(&str, TextKind); 3] = [
    ("**", TextKind::Bold),
    ("_", TextKind::Italic),
    ("`", TextKind::Code),
];

/// Extract `(alt, url)` pairs of all images in `text`, left to right.
///
/// # Examples
///
/// ```
/// use mdpress_markdown::extract_images;
///
/// assert_eq!(extract_images("a ![cat](cat.png)"), vec![("cat", "cat.png")]);
/// ```
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    IMAGE_RE
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

/// Extract `(label, url)` pairs of all links in `text`, left to right.
///
/// Image markup is never reported as a link.
///
/// # Examples
///
/// ```
/// use mdpress_markdown::extract_links;
///
/// assert_eq!(extract_links("see [docs](/docs)"), vec![("docs", "/docs")]);
/// assert!(extract_links("![x](u)").is_empty());
/// ```
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    LINK_RE
        .captures_iter(text)
        .filter(|caps| !caps[0].starts_with('!'))
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

/// Split plain nodes around image markup.
pub fn split_nodes_image(nodes: Vec<TextNode>) -> Vec<TextNode> {
    split_nodes_markup(
        nodes,
        extract_images,
        |alt, url| format!("![{alt}]({url})"),
        |alt, url| TextNode::image(alt, url),
    )
}

/// Split plain nodes around link markup.
pub fn split_nodes_link(nodes: Vec<TextNode>) -> Vec<TextNode> {
    split_nodes_markup(
        nodes,
        extract_links,
        |label, url| format!("[{label}]({url})"),
        |label, url| TextNode::link(label, url),
    )
}

/// Shared body of the image and link passes.
///
/// Each extracted pair is located by its first occurrence in the text not
/// yet consumed; the text before it becomes a plain node.
fn split_nodes_markup(
    nodes: Vec<TextNode>,
    extract: fn(&str) -> Vec<(&str, &str)>,
    markup: fn(&str, &str) -> String,
    build: fn(&str, &str) -> TextNode,
) -> Vec<TextNode> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        if !node.is_plain() {
            out.push(node);
            continue;
        }

        let matches = extract(&node.text);
        if matches.is_empty() {
            out.push(node);
            continue;
        }

        let mut rest = node.text.as_str();
        for (label, url) in matches {
            let (before, after) = rest.split_once(&markup(label, url)).unwrap_or((rest, ""));
            if !before.is_empty() {
                out.push(TextNode::plain(before));
            }
            out.push(build(label, url));
            rest = after;
        }

        if !rest.is_empty() {
            out.push(TextNode::plain(rest));
        }
    }

    out
}

/// Split plain nodes on a paired delimiter.
///
/// Segments between delimiter pairs become nodes of `kind`; the segments
/// outside them stay plain and are dropped when empty.
///
/// # Errors
///
/// Returns [`MarkdownError::MalformedInline`] if a plain node contains an
/// odd number of `delimiter` occurrences.
///
/// # Examples
///
/// ```
/// use mdpress_markdown::{TextKind, TextNode, split_nodes_delimiter};
///
/// let nodes = split_nodes_delimiter(vec![TextNode::plain("a `b` c")], "`", &TextKind::Code)?;
/// assert_eq!(nodes[1], TextNode::new("b", TextKind::Code));
/// # Ok::<(), mdpress_markdown::MarkdownError>(())
/// ```
pub fn split_nodes_delimiter(
    nodes: Vec<TextNode>,
    delimiter: &'static str,
    kind: &TextKind,
) -> Result<Vec<TextNode>, MarkdownError> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        if !node.is_plain() || !node.text.contains(delimiter) {
            out.push(node);
            continue;
        }

        let parts: Vec<&str> = node.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(MarkdownError::MalformedInline {
                delimiter,
                text: node.text,
            });
        }

        for (i, part) in parts.into_iter().enumerate() {
            if i % 2 == 1 {
                out.push(TextNode::new(part, kind.clone()));
            } else if !part.is_empty() {
                out.push(TextNode::plain(part));
            }
        }
    }

    Ok(out)
}

/// Tokenize an inline markdown string.
///
/// The returned nodes cover the whole input in order.
///
/// # Errors
///
/// Returns [`MarkdownError::MalformedInline`] on an unmatched delimiter.
pub fn text_to_textnodes(text: &str) -> Result<Vec<TextNode>, MarkdownError> {
    let nodes = split_nodes_link(split_nodes_image(vec![TextNode::plain(text)]));

    DELIMITER_PASSES
        .iter()
        .try_fold(nodes, |nodes, (delimiter, kind)| {
            tracing::trace!(%kind, delimiter, nodes = nodes.len(), "Delimiter pass");
            split_nodes_delimiter(nodes, *delimiter, kind)
        })
}
