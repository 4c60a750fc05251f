//! State threaded through the exporter.

use super::options::ModelToDomOptions;
use crate::dom::{NodeId, TableSelectionCoordinates};
use crate::dom_to_model::DomIndexer;
use crate::model::{BlockFormat, ListLevel, SegmentFormat};

/// A position recorded while writing: after `segment` inside `block`, or
/// at the start of `block` when no segment was written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub block: NodeId,
    pub segment: Option<NodeId>,
}

/// Range selection endpoints collected while writing.
#[derive(Debug, Default)]
pub struct RegularSelection {
    pub start: Option<Anchor>,
    pub end: Option<Anchor>,
    /// Position after the last node written
    pub current: Option<Anchor>,
}

/// One open list element, reusable by following items at the same depth.
#[derive(Debug, Clone)]
pub struct ListStackEntry {
    pub node: NodeId,
    pub level: ListLevel,
}

/// Formats the DOM ancestors already render, so descendants need not
/// repeat them.
#[derive(Debug, Clone, Default)]
pub struct Inherited {
    pub block: BlockFormat,
    pub segment: SegmentFormat,
}

/// Exporter context.
pub struct ModelToDomContext<'a> {
    pub options: &'a ModelToDomOptions,
    pub indexer: Option<&'a mut dyn DomIndexer>,
    pub regular_selection: RegularSelection,
    pub image_selection: Option<NodeId>,
    pub table_selection: Option<(NodeId, TableSelectionCoordinates)>,
    /// Open list elements, outermost first
    pub list_stack: Vec<ListStackEntry>,
}

impl<'a> ModelToDomContext<'a> {
    /// Create a context for one export.
    pub fn new(options: &'a ModelToDomOptions) -> Self {
        Self {
            options,
            indexer: None,
            regular_selection: RegularSelection::default(),
            image_selection: None,
            table_selection: None,
            list_stack: Vec::new(),
        }
    }

    /// Record the start of a selected run at the current position.
    pub fn open_selection(&mut self) {
        if self.regular_selection.start.is_none() {
            self.regular_selection.start = self.regular_selection.current;
        }
    }

    /// Record the end of a selected run at the current position.
    pub fn close_selection(&mut self) {
        self.regular_selection.end = self.regular_selection.current;
    }

    /// Mark a whole written node (divider, entity, general block) as
    /// selected: the range covers it from just before to just after.
    pub fn select_node(&mut self, parent: NodeId, previous: Option<NodeId>, node: NodeId) {
        if self.regular_selection.start.is_none() {
            self.regular_selection.start = Some(Anchor {
                block: parent,
                segment: previous,
            });
        }
        self.regular_selection.end = Some(Anchor {
            block: parent,
            segment: Some(node),
        });
    }
}
