//! Block assembly: markdown document to HTML tree.

use crate::block::{
    BlockType, FENCE, HEADING_RE, ORDERED_ITEM_RE, block_to_block_type, markdown_to_blocks,
};
use crate::error::MarkdownError;
use crate::html::{HtmlNode, text_node_to_html_node};
use crate::inline::text_to_textnodes;

/// Convert a markdown document to a `<div>` holding one subtree per block.
///
/// # Errors
///
/// Returns [`MarkdownError::MalformedInline`] if any block contains an
/// unmatched inline delimiter; conversion of the whole document stops.
///
/// # Examples
///
/// ```
/// use mdpress_markdown::markdown_to_html_node;
///
/// let root = markdown_to_html_node("- a\n- b")?;
/// assert_eq!(root.render(), "<div><ul><li>a</li><li>b</li></ul></div>");
/// # Ok::<(), mdpress_markdown::MarkdownError>(())
/// ```
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode, MarkdownError> {
    let children = markdown_to_blocks(markdown)
        .into_iter()
        .map(block_to_html_node)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HtmlNode::parent("div", children)?)
}

fn block_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let block_type = block_to_block_type(block);
    tracing::trace!(%block_type, len = block.len(), "Assembling block");

    match block_type {
        BlockType::Code => code_to_html_node(block),
        BlockType::Heading => heading_to_html_node(block),
        BlockType::Quote => quote_to_html_node(block),
        BlockType::UnorderedList => list_to_html_node(
            "ul",
            block.lines().filter_map(|line| line.strip_prefix("- ")),
        ),
        BlockType::OrderedList => list_to_html_node(
            "ol",
            block.lines().filter_map(|line| {
                ORDERED_ITEM_RE
                    .captures(line)
                    .and_then(|caps| caps.get(2))
                    .map(|item| item.as_str())
            }),
        ),
        BlockType::Paragraph => paragraph_to_html_node(block),
    }
}

/// Tokenize inline text and map every fragment to an HTML leaf.
fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, MarkdownError> {
    Ok(text_to_textnodes(text)?
        .iter()
        .map(text_node_to_html_node)
        .collect())
}

/// Code content is emitted verbatim, without inline tokenizing.
fn code_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let mut lines: Vec<&str> = block.lines().collect();
    if lines.first().is_some_and(|line| line.starts_with(FENCE)) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|line| line.starts_with(FENCE)) {
        lines.pop();
    }

    let mut code = lines.join("\n");
    if !code.is_empty() && !code.ends_with('\n') {
        code.push('\n');
    }

    Ok(HtmlNode::parent("pre", vec![HtmlNode::leaf("code", code)])?)
}

/// Only the first line of a heading block is kept.
fn heading_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let Some(caps) = HEADING_RE.captures(block) else {
        return paragraph_to_html_node(block);
    };
    let level = caps[1].len();
    let children = text_to_children(&caps[2])?;
    Ok(HtmlNode::parent(format!("h{level}"), children)?)
}

fn quote_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let text = block
        .lines()
        .map(|line| line.trim_start_matches('>').trim())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(HtmlNode::parent("blockquote", text_to_children(&text)?)?)
}

fn list_to_html_node<'a>(
    tag: &str,
    items: impl Iterator<Item = &'a str>,
) -> Result<HtmlNode, MarkdownError> {
    let items = items
        .map(|item| -> Result<HtmlNode, MarkdownError> {
            Ok(HtmlNode::parent("li", text_to_children(item.trim())?)?)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(HtmlNode::parent(tag, items)?)
}

/// Lines of a paragraph are joined with single spaces.
fn paragraph_to_html_node(block: &str) -> Result<HtmlNode, MarkdownError> {
    let text = block.lines().collect::<Vec<_>>().join(" ");
    Ok(HtmlNode::parent("p", text_to_children(&text)?)?)
}
