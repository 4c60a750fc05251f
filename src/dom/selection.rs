//! Selection types on the editable surface.

use super::NodeId;

/// A position in the DOM: a text node plus char offset, or a container plus
/// child index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomPoint {
    /// Text node or container element
    pub node: NodeId,
    /// Char offset (text) or child index (container)
    pub offset: usize,
}

impl DomPoint {
    /// Create a point.
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A range between two points in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomRange {
    pub start: DomPoint,
    pub end: DomPoint,
}

impl DomRange {
    /// Create a range.
    pub fn new(start: DomPoint, end: DomPoint) -> Self {
        Self { start, end }
    }

    /// A caret: a range whose ends coincide.
    pub fn collapsed(point: DomPoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Whether start and end coincide.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Rectangular cell range of a table selection, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSelectionCoordinates {
    pub first_row: usize,
    pub last_row: usize,
    pub first_column: usize,
    pub last_column: usize,
}

impl TableSelectionCoordinates {
    /// Whether the cell at (`row`, `col`) falls inside the rectangle.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_column..=self.last_column).contains(&col)
    }
}

/// Selection on the editable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomSelection {
    /// A text range, possibly collapsed
    Range { range: DomRange, is_reverted: bool },
    /// A single selected image
    Image { image: NodeId },
    /// A rectangular cell selection
    Table {
        table: NodeId,
        coordinates: TableSelectionCoordinates,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;

    #[test]
    fn test_collapsed_range() {
        let mut dom = Dom::new();
        let text = dom.create_text("abc");
        let caret = DomRange::collapsed(DomPoint::new(text, 1));
        assert!(caret.is_collapsed());

        let range = DomRange::new(DomPoint::new(text, 1), DomPoint::new(text, 2));
        assert!(!range.is_collapsed());
    }

    #[test]
    fn test_table_coordinates_contains() {
        let coordinates = TableSelectionCoordinates {
            first_row: 0,
            last_row: 1,
            first_column: 1,
            last_column: 2,
        };
        assert!(coordinates.contains(1, 2));
        assert!(!coordinates.contains(1, 0));
        assert!(!coordinates.contains(2, 1));
    }
}
