pub mod inline;

pub use inline::InlineNode;

use std::fmt;

use serde::{Serialize, Serializer};

use crate::header::HeaderTemplate;
use crate::style;

/// Semantic kind of an output node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Header,
    ElementsContainer,
    Div,
    Hr,
    Img,
    Note,
    ColumnSet,
    Column,
    EmbeddedText,
    EmbeddedImg,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Header => "header",
            NodeKind::ElementsContainer => "elements-container",
            NodeKind::Div => "div",
            NodeKind::Hr => "hr",
            NodeKind::Img => "img",
            NodeKind::Note => "note",
            NodeKind::ColumnSet => "column_set",
            NodeKind::Column => "column",
            NodeKind::EmbeddedText => "embedded-text",
            NodeKind::EmbeddedImg => "embedded-img",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// What a node carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Content {
    Empty,
    Text(String),
    /// A resource locator, fetched by the host.
    Locator(String),
    Children(Vec<OutputNode>),
}

/// Element-specific presentation hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeAttrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<HeaderTemplate>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub compact: bool,
    /// Maximum display width, already clamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_width: Option<f64>,
    /// Fixed square size for embedded images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inline: Vec<InlineNode>,
}

/// One node of the compiled card tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputNode {
    pub kind: NodeKind,
    pub classes: Vec<String>,
    pub content: Content,
    #[serde(skip_serializing_if = "is_default_attrs")]
    pub attrs: NodeAttrs,
}

fn is_default_attrs(attrs: &NodeAttrs) -> bool {
    *attrs == NodeAttrs::default()
}

impl OutputNode {
    pub fn new(kind: NodeKind, classes: &[&str]) -> Self {
        OutputNode {
            kind,
            classes: classes.iter().map(|c| c.to_string()).collect(),
            content: Content::Empty,
            attrs: NodeAttrs::default(),
        }
    }

    /// A body element node, classed `lark-card-element <kind>`.
    pub fn element(kind: NodeKind) -> Self {
        Self::new(kind, &[style::ELEMENT, kind.as_str()])
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn with_locator(mut self, locator: impl Into<String>) -> Self {
        self.content = Content::Locator(locator.into());
        self
    }

    pub fn with_children(mut self, children: Vec<OutputNode>) -> Self {
        self.content = Content::Children(children);
        self
    }

    pub fn with_attrs(mut self, attrs: NodeAttrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn children(&self) -> &[OutputNode] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn locator(&self) -> Option<&str> {
        match &self.content {
            Content::Locator(locator) => Some(locator),
            _ => None,
        }
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&OutputNode> {
        self.children().iter().find(|c| c.kind == kind)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

// ---------------------------------------------------------------------------
// Tree rendering
// ---------------------------------------------------------------------------

impl fmt::Display for OutputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &OutputNode, depth: usize) -> fmt::Result {
    write!(f, "{}{}", "  ".repeat(depth), node.kind)?;
    if !node.classes.is_empty() {
        write!(f, " [{}]", node.classes.join(" "))?;
    }

    let attrs = &node.attrs;
    if let Some(template) = attrs.template {
        write!(f, " template={}", template)?;
    }
    if attrs.compact {
        write!(f, " compact")?;
    }
    if let Some(width) = attrs.custom_width {
        write!(f, " custom_width={}", width)?;
    }
    if let Some(size) = attrs.size {
        write!(f, " size={}", size)?;
    }
    if let Some(preview) = attrs.preview {
        write!(f, " preview={}", preview)?;
    }
    if let Some(alt) = &attrs.alt {
        write!(f, " alt={:?}", alt)?;
    }

    match &node.content {
        Content::Empty => writeln!(f),
        Content::Text(text) => writeln!(f, " {:?}", text),
        Content::Locator(locator) => writeln!(f, " <{}>", locator),
        Content::Children(children) => {
            writeln!(f)?;
            for child in children {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_an_indented_tree() {
        let header = OutputNode::new(NodeKind::Header, &[style::HEADER, "blue"])
            .with_text("Hi")
            .with_attrs(NodeAttrs {
                template: Some(HeaderTemplate::Blue),
                ..NodeAttrs::default()
            });
        let elements = OutputNode::new(NodeKind::ElementsContainer, &[style::ELEMENTS])
            .with_children(vec![OutputNode::element(NodeKind::Hr)]);
        let root = OutputNode::new(NodeKind::Root, &[style::CARD]).with_children(vec![header, elements]);

        assert_eq!(
            root.to_string(),
            "root [lark-card]\n\
             \x20 header [lark-card-header blue] template=blue \"Hi\"\n\
             \x20 elements-container [lark-card-elements]\n\
             \x20   hr [lark-card-element hr]\n"
        );
    }

    #[test]
    fn serializes_kind_labels_and_skips_default_attrs() {
        let node = OutputNode::element(NodeKind::ColumnSet).with_children(vec![]);
        let json = serde_json::to_value(&node).expect("serialize");
        assert_eq!(json["kind"], "column_set");
        assert_eq!(json["content"]["type"], "children");
        assert!(json.get("attrs").is_none());
    }

    #[test]
    fn accessors() {
        let img = OutputNode::element(NodeKind::Img)
            .with_class(style::COMPACT)
            .with_locator("https://example.test/k");
        assert!(img.has_class("compact"));
        assert_eq!(img.locator(), Some("https://example.test/k"));
        assert_eq!(img.text(), None);
        assert!(img.children().is_empty());
    }
}
