//! Selection queries over a content model.
//!
//! Selection lives in the tree itself: `is_selected` flags on segments,
//! cells and whole blocks, or a single selection marker for a caret.

use super::block::{Block, Paragraph};
use super::creators::create_br;
use super::group::{BlockGroup, BlockGroupContainer};
use super::mutation::{mutate_block, SegmentHandle};
use super::path::{resolve_group, resolve_paragraph_mut, GroupPath, PathStep};
use super::segment::SegmentKind;

/// Where in a table a selection run sits.
#[derive(Debug, Clone, PartialEq)]
pub struct TableContext {
    /// Path of the group holding the table
    pub table_path: GroupPath,
    pub table_index: usize,
    pub row: usize,
    pub col: usize,
    pub is_whole_table_selected: bool,
}

impl TableContext {
    /// Whether both contexts address a cell of the same table.
    pub fn same_table(&self, other: &TableContext) -> bool {
        self.table_path == other.table_path && self.table_index == other.table_index
    }
}

/// What a selection run covers.
#[derive(Debug, Clone, PartialEq)]
pub enum RunTarget {
    /// Selected segments of the paragraph at `block_index`
    Segments {
        block_index: usize,
        segments: Vec<SegmentHandle>,
    },
    /// The whole block at `block_index`
    Block { block_index: usize },
    /// The whole table cell the run's path ends in
    TableCell,
}

/// One contiguous piece of selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRun {
    /// Group holding the target (the cell itself for `RunTarget::TableCell`)
    pub path: GroupPath,
    pub table_context: Option<TableContext>,
    pub target: RunTarget,
}

/// Where new content goes: a selection marker inside a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPoint {
    /// Group holding the paragraph
    pub path: GroupPath,
    pub paragraph_index: usize,
    pub marker_index: usize,
    pub table_context: Option<TableContext>,
}

impl InsertPoint {
    /// The paragraph holding the marker, cache dropped.
    pub fn paragraph_mut<'a>(&self, root: &'a mut dyn BlockGroupContainer) -> Option<&'a mut Paragraph> {
        resolve_paragraph_mut(root, &self.path, self.paragraph_index)
    }
}

/// Collect every selection run below `root`, in document order.
///
/// Whole blocks are reported as one run without descending into them:
/// selected dividers, entities and general blocks, fully selected tables
/// and fully selected list items. Selected table cells are reported as
/// cell runs.
pub fn iterate_selections(root: &dyn BlockGroupContainer) -> Vec<SelectionRun> {
    let mut runs = Vec::new();
    collect_runs(root, &GroupPath::root(), None, &mut runs);
    runs
}

fn collect_runs(
    group: &dyn BlockGroupContainer,
    path: &GroupPath,
    table_context: Option<&TableContext>,
    runs: &mut Vec<SelectionRun>,
) {
    let whole_block = |block_index: usize| SelectionRun {
        path: path.clone(),
        table_context: table_context.cloned(),
        target: RunTarget::Block { block_index },
    };

    for (index, block) in group.blocks().iter().enumerate() {
        match block {
            Block::Paragraph(paragraph) => {
                let segments: Vec<SegmentHandle> = paragraph
                    .segments
                    .iter()
                    .filter(|s| s.is_selected)
                    .map(SegmentHandle::of)
                    .collect();
                if !segments.is_empty() {
                    runs.push(SelectionRun {
                        path: path.clone(),
                        table_context: table_context.cloned(),
                        target: RunTarget::Segments {
                            block_index: index,
                            segments,
                        },
                    });
                }
                for (segment_index, segment) in paragraph.segments.iter().enumerate() {
                    if let SegmentKind::General(general) = &segment.kind {
                        if !segment.is_selected {
                            let child = path.child(PathStep::GeneralSegment {
                                block: index,
                                segment: segment_index,
                            });
                            collect_runs(general, &child, table_context, runs);
                        }
                    }
                }
            }
            Block::Table(table) => {
                if table.is_fully_selected() {
                    runs.push(whole_block(index));
                    continue;
                }
                for (row_index, row) in table.rows.iter().enumerate() {
                    for (col_index, cell) in row.cells.iter().enumerate() {
                        let context = TableContext {
                            table_path: path.clone(),
                            table_index: index,
                            row: row_index,
                            col: col_index,
                            is_whole_table_selected: false,
                        };
                        let cell_path = path.child(PathStep::TableCell {
                            block: index,
                            row: row_index,
                            col: col_index,
                        });
                        if cell.is_selected {
                            runs.push(SelectionRun {
                                path: cell_path,
                                table_context: Some(context),
                                target: RunTarget::TableCell,
                            });
                        } else {
                            collect_runs(cell, &cell_path, Some(&context), runs);
                        }
                    }
                }
            }
            Block::Divider(divider) => {
                if divider.is_selected {
                    runs.push(whole_block(index));
                }
            }
            Block::Entity(entity) => {
                if entity.is_selected {
                    runs.push(whole_block(index));
                }
            }
            Block::BlockGroup(group) => {
                let selected = match group {
                    BlockGroup::ListItem(item) => item.is_fully_selected(),
                    BlockGroup::General(general) => general.is_selected,
                    BlockGroup::FormatContainer(_) => false,
                };
                if selected {
                    runs.push(whole_block(index));
                } else {
                    collect_runs(group, &path.child(PathStep::Block(index)), table_context, runs);
                }
            }
        }
    }
}

/// Whether anything below `root` is selected.
pub fn has_selection(root: &dyn BlockGroupContainer) -> bool {
    !iterate_selections(root).is_empty()
}

/// Locate the first selection marker that is the caret.
pub fn find_insert_point(root: &dyn BlockGroupContainer) -> Option<InsertPoint> {
    iterate_selections(root).into_iter().find_map(|run| {
        let RunTarget::Segments {
            block_index,
            segments,
        } = &run.target
        else {
            return None;
        };
        let group = resolve_group(root, &run.path)?;
        let paragraph = group.blocks().get(*block_index)?.as_paragraph()?;
        let marker_index = paragraph.segments.iter().position(|s| {
            s.is_marker() && segments.contains(&SegmentHandle::of(s))
        })?;
        Some(InsertPoint {
            path: run.path.clone(),
            paragraph_index: *block_index,
            marker_index,
            table_context: run.table_context.clone(),
        })
    })
}

/// Remove every selection flag and selection marker below `group`.
///
/// A paragraph left empty by marker removal gets a Br so it keeps its
/// line.
pub fn clear_selection(group: &mut dyn BlockGroupContainer) {
    for block in group.blocks_mut() {
        match mutate_block(block) {
            Block::Paragraph(paragraph) => {
                let had_segments = !paragraph.segments.is_empty();
                paragraph.segments.retain(|s| !s.is_marker());
                if had_segments && paragraph.segments.is_empty() {
                    paragraph.segments.push(create_br(None));
                }
                for segment in &mut paragraph.segments {
                    segment.is_selected = false;
                    match &mut segment.kind {
                        SegmentKind::Image(image) => image.is_selected_as_image_selection = false,
                        SegmentKind::General(general) => clear_selection(general),
                        _ => {}
                    }
                }
            }
            Block::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        let cell = mutate_block(cell);
                        cell.is_selected = false;
                        clear_selection(cell);
                    }
                }
            }
            Block::Divider(divider) => divider.is_selected = false,
            Block::Entity(entity) => entity.is_selected = false,
            Block::BlockGroup(inner) => {
                match inner {
                    BlockGroup::ListItem(item) => item.format_holder.is_selected = false,
                    BlockGroup::General(general) => general.is_selected = false,
                    BlockGroup::FormatContainer(_) => {}
                }
                clear_selection(inner);
            }
        }
    }
}

/// Mark everything below `group` as selected.
pub fn select_all(group: &mut dyn BlockGroupContainer) {
    for block in group.blocks_mut() {
        match mutate_block(block) {
            Block::Paragraph(paragraph) => {
                for segment in &mut paragraph.segments {
                    segment.is_selected = true;
                    if let SegmentKind::General(general) = &mut segment.kind {
                        select_all(general);
                    }
                }
            }
            Block::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        let cell = mutate_block(cell);
                        cell.is_selected = true;
                        select_all(cell);
                    }
                }
            }
            Block::Divider(divider) => divider.is_selected = true,
            Block::Entity(entity) => entity.is_selected = true,
            Block::BlockGroup(inner) => {
                match inner {
                    BlockGroup::ListItem(item) => item.format_holder.is_selected = true,
                    BlockGroup::General(general) => general.is_selected = true,
                    BlockGroup::FormatContainer(_) => {}
                }
                select_all(inner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::*;
    use crate::model::group::Document;

    fn paragraph_with(segments: Vec<crate::model::Segment>) -> Block {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments = segments;
        paragraph.into()
    }

    #[test]
    fn test_no_selection() {
        let mut document = create_document(None);
        document
            .blocks
            .push(paragraph_with(vec![create_text("a", None, None, None)]));
        assert!(iterate_selections(&document).is_empty());
        assert!(find_insert_point(&document).is_none());
    }

    #[test]
    fn test_runs_in_document_order() {
        let mut selected = create_text("b", None, None, None);
        selected.is_selected = true;
        let mut divider = create_divider("hr", None);
        divider.is_selected = true;

        let mut document = create_document(None);
        document.blocks.push(paragraph_with(vec![
            create_text("a", None, None, None),
            selected,
        ]));
        document.blocks.push(divider.into());

        let runs = iterate_selections(&document);
        assert_eq!(runs.len(), 2);
        assert!(matches!(
            &runs[0].target,
            RunTarget::Segments { block_index: 0, segments } if segments.len() == 1
        ));
        assert_eq!(runs[1].target, RunTarget::Block { block_index: 1 });
    }

    #[test]
    fn test_selected_cells_are_cell_runs() {
        let mut table = create_table(1, None);
        for selected in [true, false] {
            let mut cell = create_table_cell(false, false, false, None, None);
            cell.is_selected = selected;
            cell.blocks.push(create_empty_paragraph(None).into());
            table.rows[0].cells.push(cell);
        }
        let mut document: Document = create_document(None);
        document.blocks.push(table.into());

        let runs = iterate_selections(&document);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].target, RunTarget::TableCell);
        let context = runs[0].table_context.as_ref().unwrap();
        assert_eq!((context.row, context.col), (0, 0));
    }

    #[test]
    fn test_find_insert_point_and_clear() {
        let mut document = create_document(None);
        document.blocks.push(paragraph_with(vec![
            create_text("a", None, None, None),
            create_selection_marker(None),
        ]));

        let point = find_insert_point(&document).unwrap();
        assert_eq!(point.paragraph_index, 0);
        assert_eq!(point.marker_index, 1);

        clear_selection(&mut document);
        assert!(!has_selection(&document));
        assert_eq!(document.blocks[0].as_paragraph().unwrap().segments.len(), 1);
    }

    #[test]
    fn test_select_all_marks_whole_table() {
        let mut table = create_table(1, None);
        let mut cell = create_table_cell(false, false, false, None, None);
        cell.blocks.push(create_empty_paragraph(None).into());
        table.rows[0].cells.push(cell);
        let mut document = create_document(None);
        document.blocks.push(table.into());

        select_all(&mut document);
        let runs = iterate_selections(&document);
        assert_eq!(runs, vec![SelectionRun {
            path: GroupPath::root(),
            table_context: None,
            target: RunTarget::Block { block_index: 0 },
        }]);
    }
}
