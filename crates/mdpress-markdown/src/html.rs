//! HTML element tree.
//!
//! An [`HtmlNode`] is either a leaf (a value, optionally wrapped in a tag) or
//! a parent (a tag wrapping child nodes). Both render to a markup string.
//! Attribute values and leaf values are emitted verbatim, without escaping.

use std::fmt;

use crate::text_node::{TextKind, TextNode};

/// Error returned when an HTML node would violate its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HtmlError {
    /// Parent nodes must have a tag.
    #[error("Parent node must have a tag")]
    MissingTag,
}

/// Ordered attribute list.
///
/// Attributes render in insertion order. Inserting an existing name
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, replacing the value of an existing one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize as ` name="value"` pairs.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        for (name, value) in &self.0 {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

/// Node of the HTML output tree.
///
/// Nodes are built with [`HtmlNode::leaf`], [`HtmlNode::text`] and
/// [`HtmlNode::parent`]; the representation is private, so a parent always
/// carries a non-empty tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlNode {
    kind: NodeKind,
    attrs: Attributes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    /// A value without children. Without a tag the value renders raw.
    Leaf { tag: Option<String>, value: String },
    /// A tagged element wrapping child nodes.
    Parent { tag: String, children: Vec<HtmlNode> },
}

impl HtmlNode {
    /// Create a tagged leaf.
    #[must_use]
    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
        })
    }

    /// Create an untagged leaf that renders as its raw value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::from_kind(NodeKind::Leaf {
            tag: None,
            value: value.into(),
        })
    }

    /// Create a parent node.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::MissingTag`] if `tag` is empty.
    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Result<Self, HtmlError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(HtmlError::MissingTag);
        }
        Ok(Self::from_kind(NodeKind::Parent { tag, children }))
    }

    fn from_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attributes::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name, value);
        self
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { tag, .. } => tag.as_deref(),
            NodeKind::Parent { tag, .. } => Some(tag),
        }
    }

    #[must_use]
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Child nodes. Leaves have none.
    #[must_use]
    pub fn children(&self) -> &[HtmlNode] {
        match &self.kind {
            NodeKind::Leaf { .. } => &[],
            NodeKind::Parent { children, .. } => children,
        }
    }

    /// Render the node and its descendants to markup.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(256);
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Leaf { tag: None, value } => out.push_str(value),
            NodeKind::Leaf {
                tag: Some(tag),
                value,
            } => {
                open_tag(tag, &self.attrs, out);
                out.push_str(value);
                close_tag(tag, out);
            }
            NodeKind::Parent { tag, children } => {
                open_tag(tag, &self.attrs, out);
                for child in children {
                    child.render_into(out);
                }
                close_tag(tag, out);
            }
        }
    }
}

impl fmt::Display for HtmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn open_tag(tag: &str, attrs: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attrs.write_to(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Convert an inline fragment to its HTML leaf.
///
/// Images render as `<img src=".." alt=".."></img>` with an empty value.
#[must_use]
pub fn text_node_to_html_node(node: &TextNode) -> HtmlNode {
    match &node.kind {
        TextKind::Plain => HtmlNode::text(node.text.as_str()),
        TextKind::Bold => HtmlNode::leaf("b", node.text.as_str()),
        TextKind::Italic => HtmlNode::leaf("i", node.text.as_str()),
        TextKind::Code => HtmlNode::leaf("code", node.text.as_str()),
        TextKind::Link { url } => HtmlNode::leaf("a", node.text.as_str()).with_attr("href", url),
        TextKind::Image { url } => HtmlNode::leaf("img", "")
            .with_attr("src", url)
            .with_attr("alt", node.text.as_str()),
    }
}
