//! Foreign content the model carries without understanding it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The outer element of a General block or segment. Its children are
/// modeled as blocks; only the element itself is opaque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementShell {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl ElementShell {
    /// Create a shell with no attributes.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
        }
    }
}

/// An owned element/text subtree, used for entity wrappers whose content
/// is opaque to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum ForeignNode {
    Text {
        text: String,
    },
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<ForeignNode>,
    },
}

impl ForeignNode {
    /// Create an element with the given tag and no attributes or children.
    pub fn element(tag_name: impl Into<String>) -> Self {
        ForeignNode::Element {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        match self {
            ForeignNode::Text { text } => text.clone(),
            ForeignNode::Element { children, .. } => {
                children.iter().map(ForeignNode::text_content).collect()
            }
        }
    }

    /// Tag name, for elements.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            ForeignNode::Element { tag_name, .. } => Some(tag_name),
            ForeignNode::Text { .. } => None,
        }
    }

    /// Attribute value, for elements.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            ForeignNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            ForeignNode::Text { .. } => None,
        }
    }

    /// Set an attribute. No-op on text nodes.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        if let ForeignNode::Element { attributes, .. } = self {
            attributes.insert(name.to_string(), value.into());
        }
    }

    /// Append a child. No-op on text nodes.
    pub fn push_child(&mut self, child: ForeignNode) {
        if let ForeignNode::Element { children, .. } = self {
            children.push(child);
        }
    }
}
