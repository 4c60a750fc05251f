//! Table grid repair.

use crate::model::creators::{create_br, create_paragraph, create_table_cell};
use crate::model::mutation::mutate_block;
use crate::model::{Block, SegmentFormat, Table};

/// Minimum row height in px.
pub const MIN_ROW_HEIGHT: f32 = 22.0;
/// Minimum column width in px.
pub const MIN_COLUMN_WIDTH: f32 = 30.0;

/// Width of a new column, by column count.
pub fn default_column_width(column_count: usize) -> f32 {
    if column_count <= 4 {
        120.0
    } else if column_count <= 6 {
        100.0
    } else {
        70.0
    }
}

/// Repair a table so it renders predictably and stays rectangular.
///
/// Empty cells are filled with a paragraph holding a Br formatted with
/// `default_segment_format`.
pub fn normalize_table(table: &mut Table, default_segment_format: Option<&SegmentFormat>) {
    let original = table.clone();

    table.format.border_collapse = Some(true);
    table.format.use_border_box = Some(true);

    let column_count = table.column_count();
    for row in &mut table.rows {
        while row.cells.len() < column_count {
            row.cells
                .push(create_table_cell(false, false, false, None, None));
        }
    }

    move_up_spanned_content(table);

    for (row_index, row) in table.rows.iter_mut().enumerate() {
        for (col_index, cell) in row.cells.iter_mut().enumerate() {
            if row_index == 0 {
                cell.span_above = false;
            }
            if col_index == 0 {
                cell.span_left = false;
            }
            if row_index > 0 && col_index > 0 {
                cell.is_header = false;
            }
            if cell.blocks.is_empty() {
                let format = default_segment_format.cloned().unwrap_or_default();
                let mut paragraph = create_paragraph(false, None, Some(&format), None);
                paragraph.segments.push(create_br(Some(&format)));
                cell.blocks.push(paragraph.into());
            }
            cell.format.use_border_box = Some(true);
        }
        if row.height < MIN_ROW_HEIGHT {
            row.height = MIN_ROW_HEIGHT;
        }
    }

    table.widths.truncate(column_count);
    for width in &mut table.widths {
        if *width < MIN_COLUMN_WIDTH {
            *width = MIN_COLUMN_WIDTH;
        }
    }
    while table.widths.len() < column_count {
        table.widths.push(default_column_width(column_count));
    }

    // Removing a row can leave a column of span targets, and the reverse.
    while remove_spanned_columns(table) | remove_spanned_rows(table) {}

    if *table != original {
        mutate_block(table);
    }
}

/// Whether the blocks are nothing but one Br-only paragraph.
fn is_placeholder_content(blocks: &[Block]) -> bool {
    match blocks {
        [] => true,
        [Block::Paragraph(paragraph)] => paragraph
            .segments
            .iter()
            .all(|s| s.is_br() || s.is_marker()),
        _ => false,
    }
}

/// Move content out of span targets into the cell owning the span.
fn move_up_spanned_content(table: &mut Table) {
    for row_index in 0..table.rows.len() {
        for col_index in 0..table.rows[row_index].cells.len() {
            let cell = &table.rows[row_index].cells[col_index];
            let spans = (cell.span_left && col_index > 0) || (cell.span_above && row_index > 0);
            if !spans {
                continue;
            }

            if is_placeholder_content(&cell.blocks) {
                continue;
            }
            let blocks = std::mem::take(&mut table.rows[row_index].cells[col_index].blocks);
            let (root_row, root_col) = table.span_root(row_index, col_index);
            if let Some(root) = table.cell_mut(root_row, root_col) {
                root.blocks.extend(blocks);
            }
        }
    }
}

/// Returns whether any column was removed.
fn remove_spanned_columns(table: &mut Table) -> bool {
    let mut removed_any = false;
    let mut col = table.column_count();
    while col > 1 {
        col -= 1;
        let all_spanned = table
            .rows
            .iter()
            .all(|row| row.cells.get(col).is_some_and(|cell| cell.span_left));
        if !all_spanned || table.rows.is_empty() {
            continue;
        }
        for row in &mut table.rows {
            row.cells.remove(col);
        }
        if col < table.widths.len() {
            let freed = table.widths.remove(col);
            table.widths[col - 1] += freed;
        }
        removed_any = true;
    }
    removed_any
}

/// Returns whether any row was removed.
fn remove_spanned_rows(table: &mut Table) -> bool {
    let mut removed_any = false;
    let mut row = table.rows.len();
    while row > 1 {
        row -= 1;
        let all_spanned = !table.rows[row].cells.is_empty()
            && table.rows[row].cells.iter().all(|cell| cell.span_above);
        if !all_spanned {
            continue;
        }
        let removed = table.rows.remove(row);
        table.rows[row - 1].height += removed.height;
        removed_any = true;
    }
    removed_any
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::*;
    use crate::model::{Paragraph, TableRow};

    fn text_cell(text: &str) -> crate::model::TableCell {
        let mut cell = create_table_cell(false, false, false, None, None);
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text(text, None, None, None));
        cell.blocks.push(paragraph.into());
        cell
    }

    fn row(cells: Vec<crate::model::TableCell>) -> TableRow {
        let mut row = create_table_row(None, 30.0);
        row.cells = cells;
        row
    }

    #[test]
    fn test_defaults_applied() {
        let mut table = create_table(0, None);
        table.rows.push(row(vec![text_cell("a"), create_table_cell(true, true, true, None, None)]));
        table.rows[0].height = 10.0;
        table.widths = vec![10.0];

        normalize_table(&mut table, None);
        assert_eq!(table.format.border_collapse, Some(true));
        assert_eq!(table.format.use_border_box, Some(true));
        assert_eq!(table.rows[0].height, MIN_ROW_HEIGHT);
        assert!(!table.rows[0].cells.is_empty());
        assert!(table.rows[0].cells.iter().all(|c| !c.span_above));
    }

    #[test]
    fn test_spanned_column_removed_and_width_merged() {
        let mut table = create_table(0, None);
        table.rows.push(row(vec![text_cell("a"), create_table_cell(true, false, false, None, None)]));
        table.rows.push(row(vec![text_cell("b"), create_table_cell(true, false, false, None, None)]));
        table.widths = vec![100.0, 50.0];

        normalize_table(&mut table, None);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.widths, vec![150.0]);
    }

    #[test]
    fn test_spanned_row_removed_and_height_merged() {
        let mut table = create_table(0, None);
        table.rows.push(row(vec![text_cell("a")]));
        table.rows.push(row(vec![create_table_cell(false, true, false, None, None)]));

        normalize_table(&mut table, None);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].height, 60.0);
    }

    #[test]
    fn test_span_content_hoisted() {
        let mut table = create_table(0, None);
        let mut target = text_cell("moved");
        target.span_left = true;
        table.rows.push(row(vec![text_cell("a"), target, text_cell("c")]));
        table.rows.push(row(vec![text_cell("d"), text_cell("e"), text_cell("f")]));

        normalize_table(&mut table, None);
        let root = &table.rows[0].cells[0];
        assert_eq!(root.blocks.len(), 2);
        let moved: &Paragraph = root.blocks[1].as_paragraph().unwrap();
        assert_eq!(moved.text(), "moved");
        assert!(is_placeholder_content(&table.rows[0].cells[1].blocks));
    }

    #[test]
    fn test_headers_only_on_edges_and_rows_padded() {
        let mut table = create_table(0, None);
        table.rows.push(row(vec![text_cell("a"), text_cell("b")]));
        let mut inner = text_cell("c");
        inner.is_header = true;
        table.rows.push(row(vec![text_cell("x"), inner]));
        table.rows.push(row(vec![text_cell("y")]));

        normalize_table(&mut table, None);
        assert!(!table.rows[1].cells[1].is_header);
        assert_eq!(table.rows[2].cells.len(), 2);
        assert_eq!(table.widths, vec![120.0, 120.0]);
    }

    #[test]
    fn test_row_removal_exposes_spanned_column() {
        let mut table = create_table(0, None);
        let mut b = text_cell("B");
        b.span_left = true;
        table.rows.push(row(vec![text_cell("A"), b]));
        let mut c = text_cell("C");
        c.span_above = true;
        let mut d = text_cell("D");
        d.span_above = true;
        table.rows.push(row(vec![c, d]));
        table.widths = vec![100.0, 50.0];

        normalize_table(&mut table, None);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.widths, vec![150.0]);
        assert_eq!(table.rows[0].height, 60.0);
        let texts: Vec<String> = table.rows[0].cells[0]
            .blocks
            .iter()
            .filter_map(Block::as_paragraph)
            .map(Paragraph::text)
            .collect();
        assert_eq!(texts, vec!["A", "B", "C", "D"]);

        let once = table.clone();
        normalize_table(&mut table, None);
        assert_eq!(table, once);
    }

    #[test]
    fn test_span_placeholder_keeps_its_format() {
        let red = SegmentFormat {
            text_color: Some("red".into()),
            ..Default::default()
        };
        let mut target = create_table_cell(true, false, false, None, None);
        let mut placeholder = create_paragraph(false, None, Some(&red), None);
        placeholder.segments.push(create_br(Some(&red)));
        target.blocks.push(placeholder.into());

        let mut table = create_table(0, None);
        table.rows.push(row(vec![text_cell("a"), target]));
        table.rows.push(row(vec![text_cell("b"), text_cell("c")]));

        normalize_table(&mut table, None);
        let root = &table.rows[0].cells[0];
        assert_eq!(root.blocks.len(), 1);
        let kept = table.rows[0].cells[1].blocks[0].as_paragraph().unwrap();
        assert_eq!(kept.segments[0].format, red);
    }

    #[test]
    fn test_idempotent() {
        let mut table = create_table(0, None);
        let mut target = text_cell("t");
        target.span_left = true;
        table.rows.push(row(vec![text_cell("a"), target]));
        table.rows.push(row(vec![create_table_cell(false, true, false, None, None)]));
        table.widths = vec![5.0];

        normalize_table(&mut table, None);
        let once = table.clone();
        normalize_table(&mut table, None);
        assert_eq!(table, once);
    }
}
