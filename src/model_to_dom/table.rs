//! Table writer: `table > tbody > tr > td|th`, spans turned back into
//! `colspan`/`rowspan`.

use super::block::{reusable_cache, write_group_children};
use super::context::{Anchor, Inherited, ModelToDomContext};
use crate::dom::{Dom, NodeId, TableSelectionCoordinates};
use crate::format::{apply_block_format, apply_dataset};
use crate::model::selection::has_selection;
use crate::model::{BlockFormat, Table};

fn table_has_selection(table: &Table) -> bool {
    table
        .rows
        .iter()
        .flat_map(|row| &row.cells)
        .any(|cell| cell.is_selected || has_selection(cell))
}

/// `(colspan, rowspan)` of the cell at (`row`, `col`).
fn spans_of(table: &Table, row: usize, col: usize) -> (usize, usize) {
    let cells = &table.rows[row].cells;
    let col_span = 1 + cells[col + 1..]
        .iter()
        .take_while(|cell| cell.span_left && !cell.span_above)
        .count();
    let row_span = 1 + table.rows[row + 1..]
        .iter()
        .take_while(|r| r.cells.get(col).is_some_and(|cell| cell.span_above && !cell.span_left))
        .count();
    (col_span, row_span)
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

pub(super) fn write_table(
    dom: &mut Dom,
    parent: NodeId,
    table: &mut Table,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    if !table_has_selection(table) {
        if let Some(node) = reusable_cache(dom, table.cached_element, parent, context) {
            dom.append_child(parent, node);
            context.regular_selection.current = Some(Anchor {
                block: parent,
                segment: Some(node),
            });
            return;
        }
    }

    let element = dom.create_element("table");
    apply_block_format(dom, element, &table.format, &BlockFormat::default());
    apply_dataset(dom, element, &table.dataset);
    dom.append_child(parent, element);
    let tbody = dom.create_element("tbody");
    dom.append_child(element, tbody);

    let spans: Vec<Vec<(usize, usize)>> = (0..table.rows.len())
        .map(|r| {
            (0..table.rows[r].cells.len())
                .map(|c| spans_of(table, r, c))
                .collect()
        })
        .collect();
    let widths = table.widths.clone();
    let mut selected: Option<TableSelectionCoordinates> = None;

    for (row_index, row) in table.rows.iter_mut().enumerate() {
        let tr = dom.create_element("tr");
        apply_block_format(dom, tr, &row.format, &BlockFormat::default());
        if row.height > 0.0 {
            dom.set_style(tr, "height", &px(row.height));
        }
        dom.append_child(tbody, tr);

        for (col_index, cell) in row.cells.iter_mut().enumerate() {
            if cell.is_selected {
                selected = Some(match selected {
                    None => TableSelectionCoordinates {
                        first_row: row_index,
                        last_row: row_index,
                        first_column: col_index,
                        last_column: col_index,
                    },
                    Some(s) => TableSelectionCoordinates {
                        first_row: s.first_row.min(row_index),
                        last_row: s.last_row.max(row_index),
                        first_column: s.first_column.min(col_index),
                        last_column: s.last_column.max(col_index),
                    },
                });
            }
            if cell.span_left || cell.span_above {
                continue;
            }

            let td = dom.create_element(if cell.is_header { "th" } else { "td" });
            let (col_span, row_span) = spans[row_index][col_index];
            if col_span > 1 {
                dom.set_attribute(td, "colspan", col_span.to_string());
            }
            if row_span > 1 {
                dom.set_attribute(td, "rowspan", row_span.to_string());
            }
            apply_block_format(dom, td, &cell.format, &BlockFormat::default());
            let width: f32 = widths
                .iter()
                .skip(col_index)
                .take(col_span)
                .sum();
            if width > 0.0 {
                dom.set_style(td, "width", &px(width));
            }
            apply_dataset(dom, td, &cell.dataset);
            dom.append_child(tr, td);

            let inner = Inherited {
                block: cell.format.inheritable(),
                segment: inherited.segment.clone(),
            };
            write_group_children(dom, td, &mut cell.blocks, context, &inner);
            if context.options.allow_cache_element {
                cell.cached_element = Some(td);
            }
        }
        if context.options.allow_cache_element {
            row.cached_element = Some(tr);
        }
    }

    if let Some(coordinates) = selected {
        if context.table_selection.is_none() {
            context.table_selection = Some((element, coordinates));
        }
    }
    if context.options.allow_cache_element {
        table.cached_element = Some(element);
    }
    if let Some(indexer) = context.indexer.as_deref_mut() {
        indexer.on_table(element, table);
    }
    context.regular_selection.current = Some(Anchor {
        block: parent,
        segment: Some(element),
    });
}
