//! Block splitting and classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Heading marker at the very start of a block.
pub(crate) static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)").unwrap());

/// Ordered list item marker, e.g. `12. `.
pub(crate) static ORDERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.*)").unwrap());

/// Code fence marker.
pub(crate) const FENCE: &str = "```";

/// Structural kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Code => "code",
            Self::Quote => "quote",
            Self::UnorderedList => "unordered_list",
            Self::OrderedList => "ordered_list",
        };
        f.write_str(name)
    }
}

/// Split a document into blocks separated by blank lines.
///
/// Blocks are trimmed; blocks that are empty after trimming are dropped.
///
/// # Examples
///
/// ```
/// use mdpress_markdown::markdown_to_blocks;
///
/// assert_eq!(markdown_to_blocks("# A\n\n\n\nb\nc\n"), vec!["# A", "b\nc"]);
/// ```
pub fn markdown_to_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block. The first matching rule wins:
/// code, heading, quote, unordered list, ordered list, paragraph.
pub fn block_to_block_type(block: &str) -> BlockType {
    if block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockType::Code;
    }

    if HEADING_RE.is_match(block) {
        return BlockType::Heading;
    }

    let lines: Vec<&str> = block.lines().collect();
    if lines.is_empty() {
        return BlockType::Paragraph;
    }

    if lines.iter().all(|line| line.starts_with('>')) {
        BlockType::Quote
    } else if lines.iter().all(|line| line.starts_with("- ")) {
        BlockType::UnorderedList
    } else if is_ordered_list(&lines) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

/// Every line is `<n>. ` with `n` counting up from 1.
fn is_ordered_list(lines: &[&str]) -> bool {
    lines.iter().zip(1u64..).all(|(line, expected)| {
        ORDERED_ITEM_RE
            .captures(line)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            == Some(expected)
    })
}
