//! Deleting the selection and leaving exactly one caret behind.
//!
//! Selection runs are collected up front as index paths and applied in
//! reverse document order, so an edit never shifts the indices of a run
//! still waiting to be applied. Blocks that go away without a replacement
//! leave an empty implicit paragraph behind for normalization to drop.
//! The first run always hosts the caret.

use std::mem;

use super::delete_block::delete_block;
use super::delete_segment::{delete_segment, DeleteDirection};
use super::format_context::FormatContext;
use crate::model::creators::{create_br, create_paragraph, create_selection_marker};
use crate::model::mutation::{mutate_block, mutate_segments};
use crate::model::path::{resolve_group_mut, resolve_paragraph_mut, GroupPath};
use crate::model::selection::{iterate_selections, InsertPoint, RunTarget, SelectionRun, TableContext};
use crate::model::{Block, Document, Paragraph, Segment, SegmentFormat};

/// What a delete did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteResult {
    /// Nothing was deleted; the selection was collapsed or absent
    NotDeleted,
    /// One character or segment next to the caret was deleted
    SingleChar,
    /// A range of content was deleted
    Range,
    /// The caret sits at an edge with nothing to delete
    NothingToDelete,
}

/// Outcome of [`delete_selection`].
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSelectionResult {
    pub delete_result: DeleteResult,
    /// The caret left behind; `None` only when the model had no selection
    pub insert_point: Option<InsertPoint>,
}

#[derive(Debug, Clone)]
struct LastParagraph {
    path: GroupPath,
    index: usize,
    table_context: Option<TableContext>,
}

/// State shared by the deletion pass and its additional steps.
pub struct DeleteSelectionContext<'a> {
    pub delete_result: DeleteResult,
    pub insert_point: Option<InsertPoint>,
    pub format_context: Option<&'a mut FormatContext>,
    last_paragraph: Option<LastParagraph>,
}

/// A step run after the selection was found collapsed.
pub type DeleteSelectionStep = fn(&mut Document, &mut DeleteSelectionContext<'_>);

/// Delete everything selected in `model`.
///
/// `additional_steps` run in order while the result is still
/// [`DeleteResult::NotDeleted`] and a caret exists, which is how caret
/// deletes (Backspace, Delete) plug in. When the deletion spans several
/// paragraphs, what remains of the last one is appended to the caret
/// paragraph.
pub fn delete_selection(
    model: &mut Document,
    additional_steps: &[DeleteSelectionStep],
    format_context: Option<&mut FormatContext>,
) -> DeleteSelectionResult {
    let mut context = delete_expanded_selection(model, format_context);

    for step in additional_steps {
        if context.insert_point.is_some() && context.delete_result == DeleteResult::NotDeleted {
            step(model, &mut context);
        }
    }

    merge_paragraph_after_delete(model, &mut context);
    log::debug!(
        "delete selection: {:?}, caret: {}",
        context.delete_result,
        context.insert_point.is_some()
    );

    DeleteSelectionResult {
        delete_result: context.delete_result,
        insert_point: context.insert_point,
    }
}

fn caret_paragraph(format: &SegmentFormat) -> Paragraph {
    let mut paragraph = create_paragraph(false, None, None, None);
    paragraph.segments.push(create_selection_marker(Some(format)));
    paragraph
}

fn delete_expanded_selection<'a>(
    model: &mut Document,
    format_context: Option<&'a mut FormatContext>,
) -> DeleteSelectionContext<'a> {
    let runs = iterate_selections(model);
    log::trace!("{} selection runs", runs.len());

    let mut context = DeleteSelectionContext {
        delete_result: DeleteResult::NotDeleted,
        insert_point: None,
        format_context,
        last_paragraph: None,
    };
    let default_format = model.format.clone();
    let mut undeletable: Vec<Vec<Segment>> = vec![Vec::new(); runs.len()];

    for (run_index, run) in runs.iter().enumerate().rev() {
        let is_caret_run = run_index == 0;
        let collector = &mut undeletable[run_index];

        match &run.target {
            RunTarget::Segments {
                block_index,
                segments,
            } => {
                let Some(paragraph) = resolve_paragraph_mut(model, &run.path, *block_index) else {
                    continue;
                };
                let (paragraph, mut indices) = mutate_segments(paragraph, segments);
                indices.sort_unstable();
                let Some(&first) = indices.first() else {
                    continue;
                };

                if is_caret_run && indices.len() == 1 && paragraph.segments[first].is_marker() {
                    context.insert_point = Some(insert_point_at(run, *block_index, first));
                    continue;
                }

                let marker_format = paragraph.segments[first].format.caret_format();
                let mut removed = 0;
                for index in indices {
                    let before = paragraph.segments.len();
                    if delete_segment(
                        paragraph,
                        index - removed,
                        context.format_context.as_deref_mut(),
                        None,
                        Some(&mut *collector),
                    ) {
                        context.delete_result = DeleteResult::Range;
                    }
                    removed += before - paragraph.segments.len();
                }

                if is_caret_run {
                    paragraph
                        .segments
                        .insert(first, create_selection_marker(Some(&marker_format)));
                    context.insert_point = Some(insert_point_at(run, *block_index, first));
                } else if run_index == runs.len() - 1 {
                    context.last_paragraph = Some(LastParagraph {
                        path: run.path.clone(),
                        index: *block_index,
                        table_context: run.table_context.clone(),
                    });
                }
            }
            RunTarget::Block { block_index } => {
                let Some(group) = resolve_group_mut(model, &run.path) else {
                    continue;
                };
                let blocks = group.blocks_mut();
                let replacement: Block = if is_caret_run {
                    caret_paragraph(&default_format).into()
                } else {
                    create_paragraph(true, None, None, None).into()
                };

                let before = blocks.len();
                if delete_block(
                    blocks,
                    *block_index,
                    Some(replacement.clone()),
                    context.format_context.as_deref_mut(),
                    None,
                ) {
                    context.delete_result = DeleteResult::Range;
                    if blocks.len() < before {
                        blocks.insert(*block_index, replacement);
                    }
                    if is_caret_run {
                        context.insert_point = Some(insert_point_at(run, *block_index, 0));
                    }
                }
            }
            RunTarget::TableCell => {
                let Some(table_context) = &run.table_context else {
                    continue;
                };
                let Some(cell) = resolve_group_mut(model, &table_context.table_path)
                    .and_then(|group| group.blocks_mut().get_mut(table_context.table_index))
                    .and_then(Block::as_table_mut)
                    .and_then(|table| {
                        mutate_block(table).cell_mut(table_context.row, table_context.col)
                    })
                else {
                    continue;
                };

                let mut paragraph = create_paragraph(false, None, None, None);
                if is_caret_run {
                    paragraph
                        .segments
                        .push(create_selection_marker(Some(&default_format)));
                }
                paragraph.segments.push(create_br(Some(&default_format)));
                cell.is_selected = false;
                cell.blocks = vec![paragraph.into()];
                context.delete_result = DeleteResult::Range;
                if is_caret_run {
                    context.insert_point = Some(insert_point_at(run, 0, 0));
                }
            }
        }
    }

    let kept: Vec<Segment> = undeletable
        .into_iter()
        .flatten()
        .map(|mut segment| {
            segment.is_selected = false;
            segment
        })
        .collect();
    if !kept.is_empty() {
        if let Some(point) = context.insert_point.as_mut() {
            if let Some(paragraph) = point.paragraph_mut(model) {
                let count = kept.len();
                paragraph
                    .segments
                    .splice(point.marker_index..point.marker_index, kept);
                point.marker_index += count;
            }
        }
    }

    context
}

fn insert_point_at(run: &SelectionRun, paragraph_index: usize, marker_index: usize) -> InsertPoint {
    InsertPoint {
        path: run.path.clone(),
        paragraph_index,
        marker_index,
        table_context: run.table_context.clone(),
    }
}

fn merge_paragraph_after_delete(model: &mut Document, context: &mut DeleteSelectionContext<'_>) {
    if !matches!(
        context.delete_result,
        DeleteResult::Range | DeleteResult::SingleChar
    ) {
        return;
    }
    let (Some(point), Some(last)) = (&context.insert_point, context.last_paragraph.take()) else {
        return;
    };
    if (last.path == point.path && last.index == point.paragraph_index)
        || last.table_context != point.table_context
    {
        return;
    }

    let Some(last_paragraph) = resolve_paragraph_mut(model, &last.path, last.index) else {
        return;
    };
    let tail = mem::take(&mut last_paragraph.segments);
    if let Some(paragraph) = point.paragraph_mut(model) {
        log::trace!("merging {} trailing segments into caret paragraph", tail.len());
        paragraph.segments.extend(tail);
    }
}

fn is_empty_text(segment: &Segment) -> bool {
    segment.text().is_some_and(str::is_empty)
}

fn selected_marker_index(paragraph: &Paragraph) -> Option<usize> {
    paragraph
        .segments
        .iter()
        .position(|s| s.is_marker() && s.is_selected)
}

/// Backspace at a collapsed caret: delete the grapheme or segment before
/// it, or join the paragraph with the block before.
pub fn delete_char_backward(model: &mut Document, context: &mut DeleteSelectionContext<'_>) {
    delete_collapsed(model, context, DeleteDirection::Backward);
}

/// Delete key at a collapsed caret: delete the grapheme or segment after
/// it, or join the next block into the paragraph.
pub fn delete_char_forward(model: &mut Document, context: &mut DeleteSelectionContext<'_>) {
    delete_collapsed(model, context, DeleteDirection::Forward);
}

fn delete_collapsed(
    model: &mut Document,
    context: &mut DeleteSelectionContext<'_>,
    direction: DeleteDirection,
) {
    let Some(point) = context.insert_point.as_mut() else {
        return;
    };
    let Some(paragraph) = point.paragraph_mut(model) else {
        return;
    };

    let neighbor = match direction {
        DeleteDirection::Backward => (0..point.marker_index)
            .rev()
            .find(|&i| !is_empty_text(&paragraph.segments[i])),
        DeleteDirection::Forward => (point.marker_index + 1..paragraph.segments.len())
            .find(|&i| !is_empty_text(&paragraph.segments[i])),
    };

    if let Some(index) = neighbor {
        if paragraph.segments[index].is_br() && direction == DeleteDirection::Forward
            && index + 1 == paragraph.segments.len()
        {
            // A trailing Br only holds the line open.
            join_next_block(model, context);
            return;
        }
        if delete_segment(
            paragraph,
            index,
            context.format_context.as_deref_mut(),
            Some(direction),
            None,
        ) {
            context.delete_result = DeleteResult::SingleChar;
            if let Some(marker_index) = selected_marker_index(paragraph) {
                point.marker_index = marker_index;
            }
        }
        return;
    }

    match direction {
        DeleteDirection::Backward => join_previous_block(model, context),
        DeleteDirection::Forward => join_next_block(model, context),
    }
}

fn join_previous_block(model: &mut Document, context: &mut DeleteSelectionContext<'_>) {
    let Some(point) = context.insert_point.as_mut() else {
        return;
    };
    let Some(group) = resolve_group_mut(model, &point.path) else {
        return;
    };
    let blocks = group.blocks_mut();
    let current = point.paragraph_index;
    if current == 0 {
        context.delete_result = DeleteResult::NothingToDelete;
        return;
    }

    let (before, after) = blocks.split_at_mut(current);
    match (&mut before[current - 1], &mut after[0]) {
        (Block::Paragraph(previous), Block::Paragraph(paragraph)) => {
            let previous = mutate_block(previous);
            if previous.segments.last().is_some_and(Segment::is_br) {
                previous.segments.pop();
            }
            let offset = previous.segments.len();
            previous.segments.append(&mut paragraph.segments);
            blocks.remove(current);
            point.paragraph_index = current - 1;
            point.marker_index += offset;
            context.delete_result = DeleteResult::Range;
        }
        (Block::Divider(_) | Block::Entity(_), _) => {
            if delete_block(
                blocks,
                current - 1,
                None,
                context.format_context.as_deref_mut(),
                Some(DeleteDirection::Backward),
            ) {
                point.paragraph_index = current - 1;
                context.delete_result = DeleteResult::Range;
            }
        }
        _ => context.delete_result = DeleteResult::NothingToDelete,
    }
}

fn join_next_block(model: &mut Document, context: &mut DeleteSelectionContext<'_>) {
    let Some(point) = context.insert_point.as_mut() else {
        return;
    };
    let Some(group) = resolve_group_mut(model, &point.path) else {
        return;
    };
    let blocks = group.blocks_mut();
    let current = point.paragraph_index;
    if current + 1 >= blocks.len() {
        context.delete_result = DeleteResult::NothingToDelete;
        return;
    }

    let (before, after) = blocks.split_at_mut(current + 1);
    match (&mut before[current], &mut after[0]) {
        (Block::Paragraph(paragraph), Block::Paragraph(next)) => {
            let paragraph = mutate_block(paragraph);
            if paragraph.segments.last().is_some_and(Segment::is_br)
                && paragraph.segments.len() > point.marker_index + 1
            {
                paragraph.segments.pop();
            }
            paragraph.segments.append(&mut next.segments);
            blocks.remove(current + 1);
            context.delete_result = DeleteResult::Range;
        }
        (_, Block::Divider(_) | Block::Entity(_)) => {
            if delete_block(
                blocks,
                current + 1,
                None,
                context.format_context.as_deref_mut(),
                Some(DeleteDirection::Forward),
            ) {
                context.delete_result = DeleteResult::Range;
            }
        }
        _ => context.delete_result = DeleteResult::NothingToDelete,
    }
}

/// Delete every segment before the caret in its paragraph.
pub fn delete_all_segment_before(model: &mut Document, context: &mut DeleteSelectionContext<'_>) {
    let Some(point) = context.insert_point.as_mut() else {
        return;
    };
    let Some(paragraph) = point.paragraph_mut(model) else {
        return;
    };

    for index in (0..point.marker_index).rev() {
        paragraph.segments[index].is_selected = true;
        let before = paragraph.segments.len();
        if delete_segment(
            paragraph,
            index,
            context.format_context.as_deref_mut(),
            None,
            None,
        ) {
            context.delete_result = DeleteResult::Range;
        }
        if paragraph.segments.len() == before {
            paragraph.segments[index].is_selected = false;
        }
        point.marker_index -= before - paragraph.segments.len();
    }
}
