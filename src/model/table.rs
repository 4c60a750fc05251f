//! Table structure.
//!
//! The grid is stored row-major and is rectangular. A merged cell is a root
//! cell plus span targets: cells flagged `span_left`/`span_above` whose
//! visual content belongs to their left/above neighbour.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::format::{BlockFormat, Dataset};
use super::is_false;
use super::mutation::mutate_block;
use crate::dom::NodeId;

/// A table block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub rows: Vec<TableRow>,
    /// Column widths in px, parallel to the columns
    #[serde(default)]
    pub widths: Vec<f32>,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(default, skip_serializing_if = "Dataset::is_empty")]
    pub dataset: Dataset,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// One table row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Row height in px
    #[serde(default)]
    pub height: f32,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(default)]
    pub cells: Vec<TableCell>,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// One grid cell; also a block group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockGroupType", rename = "TableCell", rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_left: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub span_above: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_header: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Dataset::is_empty")]
    pub dataset: Dataset,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

impl Table {
    /// Number of columns: the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Whether there is at least one cell and every cell is selected.
    pub fn is_fully_selected(&self) -> bool {
        self.rows.iter().any(|r| !r.cells.is_empty())
            && self
                .rows
                .iter()
                .all(|r| r.cells.iter().all(|c| c.is_selected))
    }

    /// Whether any cell is selected.
    pub fn has_selected_cell(&self) -> bool {
        self.rows
            .iter()
            .any(|r| r.cells.iter().any(|c| c.is_selected))
    }

    /// Cell at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row)?.cells.get(col)
    }

    /// Mutable cell at (`row`, `col`), dropping the row and cell caches.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        let row = mutate_block(self.rows.get_mut(row)?);
        Some(mutate_block(row.cells.get_mut(col)?))
    }

    /// Walk up/left from (`row`, `col`) through span targets to the cell
    /// that owns the content.
    pub fn span_root(&self, mut row: usize, mut col: usize) -> (usize, usize) {
        while let Some(cell) = self.cell(row, col) {
            if cell.span_left && col > 0 {
                col -= 1;
            } else if cell.span_above && row > 0 {
                row -= 1;
            } else {
                break;
            }
        }
        (row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Table {
        Table {
            rows: (0..rows)
                .map(|_| TableRow {
                    cells: (0..cols).map(|_| TableCell::default()).collect(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_column_count_and_selection() {
        let mut table = grid(2, 3);
        assert_eq!(table.column_count(), 3);
        assert!(!table.has_selected_cell());

        for row in &mut table.rows {
            for cell in &mut row.cells {
                cell.is_selected = true;
            }
        }
        assert!(table.is_fully_selected());
        assert!(!Table::default().is_fully_selected());
    }

    #[test]
    fn test_span_root() {
        let mut table = grid(2, 2);
        table.rows[0].cells[1].span_left = true;
        table.rows[1].cells[0].span_above = true;
        table.rows[1].cells[1].span_left = true;

        assert_eq!(table.span_root(0, 1), (0, 0));
        assert_eq!(table.span_root(1, 1), (0, 0));
        assert_eq!(table.span_root(1, 0), (0, 0));
    }

    #[test]
    fn test_cell_json_shape() {
        let cell = TableCell {
            is_header: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["blockGroupType"], "TableCell");
        assert_eq!(json["isHeader"], true);
        assert!(json.get("spanLeft").is_none());
    }
}
