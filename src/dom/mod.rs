//! A small arena DOM standing in for the live editable surface.
//!
//! Nodes live in a single arena owned by [`Dom`] and are addressed by a
//! copyable [`NodeId`]. Detached nodes stay in the arena so ids held by a
//! caller (or cached by the content model) never dangle; they simply have no
//! parent until reinserted.

mod html;
mod selection;
mod style;

pub use html::{escape_attribute, escape_text, parse_fragment, VOID_ELEMENTS};
pub use selection::{DomPoint, DomRange, DomSelection, TableSelectionCoordinates};
pub use style::{parse_declarations, parse_px, serialize_declarations};

use std::collections::BTreeMap;

use crate::model::ForeignNode;

/// Identifier of a node inside a [`Dom`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index, useful for logging.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// An element with a lowercase tag name and attributes
    Element(ElementData),
    /// A text node
    Text(String),
    /// A document fragment: a parentless container for building subtrees
    Fragment,
}

/// Element payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag_name: String,
    /// Attributes in name order
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena holding every node of one editable surface.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<NodeData>,
}

impl Dom {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData {
            tag_name: tag_name.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
        }))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeKind::Text(text.into()))
    }

    /// Create a detached document fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeKind::Fragment)
    }

    /// Number of nodes ever allocated in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `node` was allocated by this arena.
    pub fn is_valid(&self, node: NodeId) -> bool {
        node.0 < self.nodes.len()
    }

    /// Node kind.
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.nodes[node.0].kind
    }

    /// Whether the node is an element.
    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Element(_))
    }

    /// Whether the node is a text node.
    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Text(_))
    }

    /// Element payload, if the node is an element.
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.nodes[node.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Lowercase tag name of an element.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag_name.as_str())
    }

    /// Data of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Replace the data of a text node. No-op for other node kinds.
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let NodeKind::Text(data) = &mut self.nodes[node.0].kind {
            *data = text.into();
        }
    }

    /// Length of a text node in chars, or child count of a container.
    pub fn node_length(&self, node: NodeId) -> usize {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => text.chars().count(),
            _ => self.nodes[node.0].children.len(),
        }
    }

    /// Parent node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Child nodes in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// First child.
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].children.first().copied()
    }

    /// Last child.
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].children.last().copied()
    }

    /// Index of `node` within its parent.
    pub fn child_index(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.nodes[parent.0].children.iter().position(|&c| c == node)
    }

    /// Next sibling.
    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.child_index(node)?;
        self.nodes[parent.0].children.get(index + 1).copied()
    }

    /// Previous sibling.
    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let index = self.child_index(node)?;
        index
            .checked_sub(1)
            .and_then(|i| self.nodes[parent.0].children.get(i).copied())
    }

    /// Whether `ancestor` contains `node` (a node contains itself).
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Detach a node from its parent. The node keeps its own subtree.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    /// elsewhere. Fragments are spliced: their children move instead.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Insert `child` into `parent` before `reference` (or at the end when
    /// `reference` is `None` or not a child of `parent`).
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if matches!(self.nodes[child.0].kind, NodeKind::Fragment) {
            let moved: Vec<NodeId> = self.nodes[child.0].children.clone();
            for node in moved {
                self.insert_before(parent, node, reference);
            }
            return;
        }

        self.remove(child);

        let index = reference
            .filter(|r| self.parent(*r) == Some(parent))
            .and_then(|r| self.child_index(r))
            .unwrap_or(self.nodes[parent.0].children.len());

        self.nodes[parent.0].children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Move every child of `node` in front of it and detach `node`.
    pub fn unwrap(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            let children: Vec<NodeId> = self.children(node).to_vec();
            for child in children {
                self.insert_before(parent, child, Some(node));
            }
            self.remove(node);
        }
    }

    /// Wrap `node` in a new element of the given tag and return the wrapper.
    pub fn wrap(&mut self, node: NodeId, tag_name: &str) -> NodeId {
        let wrapper = self.create_element(tag_name);
        if let Some(parent) = self.parent(node) {
            self.insert_before(parent, wrapper, Some(node));
        }
        self.append_child(wrapper, node);
        wrapper
    }

    /// Remove every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Attribute value.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    /// Set an attribute. No-op for non-elements.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.element_mut(node) {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.into());
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.remove(name);
        }
    }

    /// Class names of an element.
    pub fn class_list(&self, node: NodeId) -> Vec<&str> {
        self.attribute(node, "class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Parsed inline style declarations of an element, in source order.
    pub fn styles(&self, node: NodeId) -> Vec<(String, String)> {
        self.attribute(node, "style")
            .map(parse_declarations)
            .unwrap_or_default()
    }

    /// Value of one inline style property.
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.styles(node)
            .into_iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Set one inline style property, replacing an existing value.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let mut declarations = self.styles(node);
        declarations.retain(|(name, _)| name != property);
        declarations.push((property.to_string(), value.to_string()));
        self.set_attribute(node, "style", serialize_declarations(&declarations));
    }

    /// Remove one inline style property; drops the attribute when empty.
    pub fn remove_style(&mut self, node: NodeId, property: &str) {
        let mut declarations = self.styles(node);
        let before = declarations.len();
        declarations.retain(|(name, _)| name != property);
        if declarations.len() == before {
            return;
        }
        if declarations.is_empty() {
            self.remove_attribute(node, "style");
        } else {
            self.set_attribute(node, "style", serialize_declarations(&declarations));
        }
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            _ => {
                for &child in &self.nodes[node.0].children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Capture a subtree as an owned [`ForeignNode`].
    pub fn snapshot(&self, node: NodeId) -> ForeignNode {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => ForeignNode::Text { text: text.clone() },
            NodeKind::Element(data) => ForeignNode::Element {
                tag_name: data.tag_name.clone(),
                attributes: data.attributes.clone(),
                children: self.children(node).iter().map(|&c| self.snapshot(c)).collect(),
            },
            NodeKind::Fragment => ForeignNode::Element {
                tag_name: "span".to_string(),
                attributes: BTreeMap::new(),
                children: self.children(node).iter().map(|&c| self.snapshot(c)).collect(),
            },
        }
    }

    /// Build a detached subtree from an owned [`ForeignNode`].
    pub fn materialize(&mut self, node: &ForeignNode) -> NodeId {
        match node {
            ForeignNode::Text { text } => self.create_text(text.clone()),
            ForeignNode::Element {
                tag_name,
                attributes,
                children,
            } => {
                let element = self.create_element(tag_name);
                for (name, value) in attributes {
                    self.set_attribute(element, name, value.clone());
                }
                for child in children {
                    let child = self.materialize(child);
                    self.append_child(element, child);
                }
                element
            }
        }
    }

    /// Merge adjacent text siblings and drop empty text nodes under `root`,
    /// remapping `points` so they keep addressing the same logical position.
    ///
    /// A point inside a dropped empty text node moves to its parent at the
    /// dropped node's child index.
    pub fn normalize_text(&mut self, root: NodeId, points: &mut [DomPoint]) {
        let children: Vec<NodeId> = self.children(root).to_vec();
        let mut previous_text: Option<NodeId> = None;

        for child in children {
            if !self.is_text(child) {
                previous_text = None;
                self.normalize_text(child, points);
                continue;
            }

            let length = self.node_length(child);
            if length == 0 {
                let index = self.child_index(child).unwrap_or(0);
                for point in points.iter_mut() {
                    if point.node == child {
                        *point = DomPoint::new(root, index);
                    } else if point.node == root && point.offset > index {
                        point.offset -= 1;
                    }
                }
                self.remove(child);
                continue;
            }

            if let Some(previous) = previous_text {
                let previous_length = self.node_length(previous);
                let index = self.child_index(child).unwrap_or(0);
                let merged = format!(
                    "{}{}",
                    self.text(previous).unwrap_or_default(),
                    self.text(child).unwrap_or_default()
                );
                self.set_text(previous, merged);
                for point in points.iter_mut() {
                    if point.node == child {
                        *point = DomPoint::new(previous, previous_length + point.offset);
                    } else if point.node == root && point.offset == index {
                        *point = DomPoint::new(previous, previous_length);
                    } else if point.node == root && point.offset > index {
                        point.offset -= 1;
                    }
                }
                self.remove(child);
            } else {
                previous_text = Some(child);
            }
        }
    }

    /// Serialize a node including itself.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        html::write_node(self, node, &mut out);
        out
    }

    /// Serialize the children of a node.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            html::write_node(self, child, &mut out);
        }
        out
    }
}
