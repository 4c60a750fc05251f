//! Table import: expands `rowspan`/`colspan` into span-target cells.

use super::builder::{add_block, close_block};
use super::context::DomToModelContext;
use super::processors::{parse_block_formats, parse_segment_formats, process_child_nodes};
use crate::dom::{parse_px, Dom, NodeId};
use crate::format::{parse_block_format, parse_dataset};
use crate::model::creators::{create_table, create_table_cell, create_table_row};
use crate::model::{BlockFormat, BlockGroupContainer, TableCell};

/// `tr` elements of a table, looking through row groups.
fn collect_rows(dom: &Dom, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    for &child in dom.children(table) {
        match dom.tag_name(child) {
            Some("tr") => rows.push(child),
            Some("thead") | Some("tbody") | Some("tfoot") => rows.extend(
                dom.children(child)
                    .iter()
                    .copied()
                    .filter(|&row| dom.tag_name(row) == Some("tr")),
            ),
            _ => {}
        }
    }
    rows
}

fn span_attribute(dom: &Dom, node: NodeId, name: &str) -> usize {
    dom.attribute(node, name)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .max(1)
}

pub(super) fn process_table(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let selected_cells = context.table_selection(node);
    let rows = collect_rows(dom, node);

    let mut table = context.stack_format(|context| {
        let format = parse_block_formats(dom, node, "table", context);
        parse_segment_formats(dom, node, context);
        context.block_format = BlockFormat::default();

        let mut table = create_table(0, Some(&format));
        table.dataset = parse_dataset(dom, node);

        let mut grid: Vec<Vec<Option<TableCell>>> = Vec::new();
        let ensure = |grid: &mut Vec<Vec<Option<TableCell>>>, row: usize, col: usize| {
            while grid.len() <= row {
                grid.push(Vec::new());
            }
            while grid[row].len() <= col {
                grid[row].push(None);
            }
        };

        for (row_index, &tr) in rows.iter().enumerate() {
            let height = dom
                .style(tr, "height")
                .and_then(|h| parse_px(&h))
                .unwrap_or(0.0);
            let mut row_format = BlockFormat::default();
            parse_block_format(dom, tr, &mut row_format);
            row_format.height = None;
            let mut row = create_table_row(Some(&row_format), height);
            if context.options.allow_cache_element {
                row.cached_element = Some(tr);
            }
            table.rows.push(row);
            ensure(&mut grid, row_index, 0);

            let mut col_index = 0;
            for &td in dom.children(tr) {
                let tag = match dom.tag_name(td) {
                    Some(tag @ ("td" | "th")) => tag,
                    _ => continue,
                };
                while grid[row_index].get(col_index).is_some_and(Option::is_some) {
                    col_index += 1;
                }

                let col_span = span_attribute(dom, td, "colspan");
                let row_span = span_attribute(dom, td, "rowspan");
                let is_selected = selected_cells.is_some_and(|c| c.contains(row_index, col_index));

                let cell = context.stack_format(|context| {
                    let mut format = BlockFormat::default();
                    parse_block_format(dom, td, &mut format);
                    for parser in &context.options.block_format_parsers {
                        parser(dom, td, &mut format);
                    }
                    if col_span == 1 {
                        if let Some(width) = format.width.take().and_then(|w| parse_px(&w)) {
                            if table.widths.len() <= col_index {
                                table.widths.resize(col_index + 1, 0.0);
                            }
                            table.widths[col_index] = width;
                        }
                    } else {
                        format.width = None;
                    }
                    format.height = None;

                    let dataset = parse_dataset(dom, td);
                    let mut cell =
                        create_table_cell(false, false, tag == "th", Some(&format), Some(&dataset));
                    cell.is_selected = is_selected;
                    if context.options.allow_cache_element {
                        cell.cached_element = Some(td);
                    }

                    parse_segment_formats(dom, td, context);
                    context.block_format = format.inheritable();
                    let was_in_selection = context.is_in_selection;
                    if is_selected {
                        context.is_in_selection = true;
                    }
                    context.isolate_list(|context| {
                        process_child_nodes(&mut cell, dom, td, context);
                    });
                    if is_selected {
                        context.is_in_selection = was_in_selection;
                    }
                    cell
                });

                for r in 0..row_span {
                    for c in 0..col_span {
                        let (target_row, target_col) = (row_index + r, col_index + c);
                        ensure(&mut grid, target_row, target_col);
                        if grid[target_row][target_col].is_some() {
                            continue;
                        }
                        let placed = if r == 0 && c == 0 {
                            cell.clone()
                        } else {
                            let mut target = create_table_cell(
                                c > 0,
                                r > 0,
                                cell.is_header,
                                Some(&cell.format),
                                None,
                            );
                            target.is_selected = selected_cells
                                .is_some_and(|s| s.contains(target_row, target_col));
                            target
                        };
                        grid[target_row][target_col] = Some(placed);
                    }
                }
                col_index += col_span;
            }
        }

        // Rows implied by a rowspan running past the last tr.
        while table.rows.len() < grid.len() {
            table.rows.push(create_table_row(None, 0.0));
        }
        let column_count = grid.iter().map(Vec::len).max().unwrap_or(0);
        for (row, cells) in table.rows.iter_mut().zip(grid) {
            row.cells = cells
                .into_iter()
                .map(|cell| {
                    cell.unwrap_or_else(|| create_table_cell(false, false, false, None, None))
                })
                .collect();
            while row.cells.len() < column_count {
                row.cells
                    .push(create_table_cell(false, false, false, None, None));
            }
        }
        table
    });

    if context.options.allow_cache_element {
        table.cached_element = Some(node);
    }
    log::trace!(
        "imported table {}x{}",
        table.rows.len(),
        table.column_count()
    );
    if let Some(indexer) = context.indexer.as_deref_mut() {
        indexer.on_table(node, &table);
    }
    add_block(group, table);
    close_block(group, &context.block_format);
}
