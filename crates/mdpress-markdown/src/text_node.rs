//! Typed inline markdown fragments.

use std::fmt;

/// Kind of an inline fragment.
///
/// Links and images carry their target URL; the other kinds have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Unformatted text.
    Plain,
    /// `**bold**`
    Bold,
    /// `_italic_`
    Italic,
    /// `` `code` ``
    Code,
    /// `[label](url)`
    Link {
        /// Link target.
        url: String,
    },
    /// `![alt](url)`
    Image {
        /// Image source.
        url: String,
    },
}

impl fmt::Display for TextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Plain => "plain",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Link { .. } => "link",
            Self::Image { .. } => "image",
        };
        f.write_str(name)
    }
}

/// An inline markdown fragment.
///
/// For links `text` is the label, for images it is the alt text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextNode {
    pub text: String,
    pub kind: TextKind,
}

impl TextNode {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: TextKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// Create an unformatted fragment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextKind::Plain)
    }

    /// Create a link fragment.
    #[must_use]
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(label, TextKind::Link { url: url.into() })
    }

    /// Create an image fragment.
    #[must_use]
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(alt, TextKind::Image { url: url.into() })
    }

    /// Whether later tokenizing passes may still split this fragment.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.kind == TextKind::Plain
    }
}
