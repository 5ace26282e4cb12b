//! Markdown conversion errors.

use crate::html::HtmlError;

/// Error returned when a document cannot be converted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkdownError {
    /// An inline delimiter appears an odd number of times in a text run.
    #[error("Invalid markdown syntax: unmatched `{delimiter}` in {text:?}")]
    MalformedInline {
        /// The unmatched delimiter (`**`, `_` or `` ` ``).
        delimiter: &'static str,
        /// The text run containing the delimiter.
        text: String,
    },
    /// An HTML node was built in violation of its invariants.
    #[error("{0}")]
    Structural(#[from] HtmlError),
}
