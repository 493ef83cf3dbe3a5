//! Markdown syntax tree.
//!
//! The tree mirrors the block/inline structure of a markdown document.
//! Every node carries a [`NodeKind`] (with kind-specific fields), a textual
//! `value` for leaf kinds and an ordered list of children.
//!
//! ```text
//! Root
//! ├── Heading { depth: 1 }
//! │   └── Text "Title"
//! ├── Code { lang: Some("mermaid") }  value = "graph TD; A-->B;"
//! └── Paragraph
//!     ├── Text "see "
//!     └── InlineCode  value = "main.rs"
//! ```
//!
//! Transforms mutate nodes in place. Rewriting a node's kind (for example
//! `code` → `html`) keeps its position and children untouched.

use std::fmt;

/// Column alignment of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    None,
    Left,
    Center,
    Right,
}

impl Align {
    pub const fn as_css(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Left => Some("left"),
            Self::Center => Some("center"),
            Self::Right => Some("right"),
        }
    }
}

/// Kind of a syntax tree node, with the fields specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,

    // Block nodes
    Paragraph,
    Heading { depth: u8, id: Option<String> },
    Blockquote,
    /// Fenced or indented code block. `value` holds the raw source.
    Code {
        lang: Option<String>,
        meta: Option<String>,
    },
    /// Raw markup, emitted verbatim. `value` holds the markup.
    Html,
    List { ordered: bool, start: Option<u64> },
    ListItem { checked: Option<bool> },
    ThematicBreak,
    Table { align: Vec<Align> },
    TableHead,
    TableRow,
    TableCell,
    FootnoteDefinition { label: String },
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    /// Display math. `value` holds the formula.
    Math,

    // Inline nodes
    Text,
    InlineCode,
    InlineMath,
    Emphasis,
    Strong,
    Delete,
    Superscript,
    Subscript,
    Link { url: String, title: Option<String> },
    Image { url: String, title: Option<String> },
    Break,
    FootnoteReference { label: String },
}

/// Fieldless discriminant of [`NodeKind`], used to filter tree walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Root,
    Paragraph,
    Heading,
    Blockquote,
    Code,
    Html,
    List,
    ListItem,
    ThematicBreak,
    Table,
    TableHead,
    TableRow,
    TableCell,
    FootnoteDefinition,
    DefinitionList,
    DefinitionTerm,
    DefinitionDescription,
    Math,
    Text,
    InlineCode,
    InlineMath,
    Emphasis,
    Strong,
    Delete,
    Superscript,
    Subscript,
    Link,
    Image,
    Break,
    FootnoteReference,
}

impl Tag {
    /// Type name as used in markdown tree terminology (`"code"`, `"html"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::Blockquote => "blockquote",
            Self::Code => "code",
            Self::Html => "html",
            Self::List => "list",
            Self::ListItem => "listItem",
            Self::ThematicBreak => "thematicBreak",
            Self::Table => "table",
            Self::TableHead => "tableHead",
            Self::TableRow => "tableRow",
            Self::TableCell => "tableCell",
            Self::FootnoteDefinition => "footnoteDefinition",
            Self::DefinitionList => "definitionList",
            Self::DefinitionTerm => "definitionTerm",
            Self::DefinitionDescription => "definitionDescription",
            Self::Math => "math",
            Self::Text => "text",
            Self::InlineCode => "inlineCode",
            Self::InlineMath => "inlineMath",
            Self::Emphasis => "emphasis",
            Self::Strong => "strong",
            Self::Delete => "delete",
            Self::Superscript => "superscript",
            Self::Subscript => "subscript",
            Self::Link => "link",
            Self::Image => "image",
            Self::Break => "break",
            Self::FootnoteReference => "footnoteReference",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Root => Tag::Root,
            Self::Paragraph => Tag::Paragraph,
            Self::Heading { .. } => Tag::Heading,
            Self::Blockquote => Tag::Blockquote,
            Self::Code { .. } => Tag::Code,
            Self::Html => Tag::Html,
            Self::List { .. } => Tag::List,
            Self::ListItem { .. } => Tag::ListItem,
            Self::ThematicBreak => Tag::ThematicBreak,
            Self::Table { .. } => Tag::Table,
            Self::TableHead => Tag::TableHead,
            Self::TableRow => Tag::TableRow,
            Self::TableCell => Tag::TableCell,
            Self::FootnoteDefinition { .. } => Tag::FootnoteDefinition,
            Self::DefinitionList => Tag::DefinitionList,
            Self::DefinitionTerm => Tag::DefinitionTerm,
            Self::DefinitionDescription => Tag::DefinitionDescription,
            Self::Math => Tag::Math,
            Self::Text => Tag::Text,
            Self::InlineCode => Tag::InlineCode,
            Self::InlineMath => Tag::InlineMath,
            Self::Emphasis => Tag::Emphasis,
            Self::Strong => Tag::Strong,
            Self::Delete => Tag::Delete,
            Self::Superscript => Tag::Superscript,
            Self::Subscript => Tag::Subscript,
            Self::Link { .. } => Tag::Link,
            Self::Image { .. } => Tag::Image,
            Self::Break => Tag::Break,
            Self::FootnoteReference { .. } => Tag::FootnoteReference,
        }
    }

    /// Language of a code node (`None` for other kinds or unset).
    pub fn lang(&self) -> Option<&str> {
        match self {
            Self::Code { lang, .. } => lang.as_deref(),
            _ => None,
        }
    }
}

/// A node of the markdown syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Literal content for text, code, inline code, math and html nodes.
    pub value: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            value: String::new(),
            children: Vec::new(),
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Root,
            value: String::new(),
            children,
        }
    }

    /// Leaf node with literal content.
    pub fn leaf(kind: NodeKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Text, value)
    }

    pub fn code(lang: Option<&str>, value: impl Into<String>) -> Self {
        Self::leaf(
            NodeKind::Code {
                lang: lang.map(str::to_string),
                meta: None,
            },
            value,
        )
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Html, value)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    #[inline]
    pub const fn tag(&self) -> Tag {
        self.kind.tag()
    }

    /// Concatenated text of this node's text-like descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        super::visit::visit(self, None, |node| {
            if matches!(node.tag(), Tag::Text | Tag::InlineCode) {
                out.push_str(&node.value);
            }
        });
        out
    }

    /// Total number of nodes in this subtree (including `self`).
    pub fn count(&self) -> usize {
        let mut n = 0;
        super::visit::visit(self, None, |_| n += 1);
        n
    }
}

/// Dropped with an explicit stack so deep trees do not exhaust the call stack.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
