//! Rich-text document tree.
//!
//! # Responsibility
//! - Define the JSON tree stored in every editable résumé element.
//! - Provide constructors for the canonical node shapes used by migration and
//!   default content.
//!
//! # Invariants
//! - A root node has `type == "doc"` and only block children.
//! - Text nodes never carry an empty `text` value.
//! - Absent optional fields are omitted on the wire, never `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NODE_DOC: &str = "doc";
pub const NODE_PARAGRAPH: &str = "paragraph";
pub const NODE_TEXT: &str = "text";

pub const MARK_BOLD: &str = "bold";
pub const MARK_ITALIC: &str = "italic";
pub const MARK_UNDERLINE: &str = "underline";
pub const MARK_CODE: &str = "code";
pub const MARK_TEXT_STYLE: &str = "textStyle";

/// Attribute bag carried by nodes and marks.
pub type Attrs = Map<String, Value>;

/// Inline style annotation attached to a text node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl Mark {
    /// Creates a mark without attributes, e.g. `bold`.
    pub fn simple(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attrs: None,
        }
    }

    pub fn with_attrs(kind: impl Into<String>, attrs: Attrs) -> Self {
        Self {
            kind: kind.into(),
            attrs: Some(attrs),
        }
    }
}

/// One node of the document tree (`JSONContent` on the wire).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<JsonContent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl JsonContent {
    /// Canonical empty content: a `doc` holding one empty paragraph.
    pub fn empty_doc() -> Self {
        Self::doc(vec![Self::paragraph(Vec::new())])
    }

    pub fn doc(blocks: Vec<JsonContent>) -> Self {
        Self::container(NODE_DOC, blocks)
    }

    pub fn paragraph(inline: Vec<JsonContent>) -> Self {
        Self::container(NODE_PARAGRAPH, inline)
    }

    /// Creates an inline text node.
    ///
    /// An empty `marks` list is stored as `None` so the wire shape omits it.
    pub fn text_node(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            kind: NODE_TEXT.to_string(),
            attrs: None,
            content: None,
            marks: if marks.is_empty() { None } else { Some(marks) },
            text: Some(text.into()),
        }
    }

    fn container(kind: &str, children: Vec<JsonContent>) -> Self {
        Self {
            kind: kind.to_string(),
            attrs: None,
            content: Some(children),
            marks: None,
            text: None,
        }
    }

    pub fn is_doc(&self) -> bool {
        self.kind == NODE_DOC
    }

    pub fn is_text(&self) -> bool {
        self.kind == NODE_TEXT
    }

    /// Child nodes, empty when the node has no `content` field.
    pub fn children(&self) -> &[JsonContent] {
        self.content.as_deref().unwrap_or(&[])
    }

    /// Sets one attribute, creating the attribute bag when missing.
    pub fn set_attr(&mut self, key: impl Into<String>, value: Value) {
        self.attrs
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
    }

    /// Concatenated text of all descendant text nodes, blocks separated by
    /// newlines.
    pub fn plain_text(&self) -> String {
        if let Some(text) = &self.text {
            return text.clone();
        }
        let separator = if self.is_doc() { "\n" } else { "" };
        self.children()
            .iter()
            .map(JsonContent::plain_text)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Returns whether the tree holds no visible text.
    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }

    /// Depth-first walk over this node and all descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a JsonContent)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

impl Default for JsonContent {
    fn default() -> Self {
        Self::empty_doc()
    }
}
