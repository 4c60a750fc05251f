//! Deleting one segment from a paragraph.

use unicode_segmentation::UnicodeSegmentation;

use super::format_context::{DeletedEntity, EntityOperation, FormatContext};
use crate::model::mutation::mutate_block;
use crate::model::{Paragraph, Segment, SegmentKind};
use crate::normalize::NBSP;

/// Direction of a caret delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Delete key: removes content after the caret
    Forward,
    /// Backspace: removes content before the caret
    Backward,
}

/// Entity operation for a delete, or `None` when the entity stays.
pub(crate) fn entity_operation(
    is_selected: bool,
    direction: Option<DeleteDirection>,
) -> Option<EntityOperation> {
    if is_selected {
        Some(EntityOperation::Overwrite)
    } else {
        match direction {
            Some(DeleteDirection::Forward) => Some(EntityOperation::RemoveFromStart),
            Some(DeleteDirection::Backward) => Some(EntityOperation::RemoveFromEnd),
            None => None,
        }
    }
}

/// Keep a space that now borders the edit point visible: a trailing space
/// before it becomes non-breaking, and so does a leading space after it
/// when nothing before it already shows a space.
fn protect_edge_spaces(segments: &mut [Segment], index: usize) {
    let mut space_before = false;
    if let Some(text) = index
        .checked_sub(1)
        .and_then(|i| segments.get_mut(i))
        .and_then(Segment::text_mut)
    {
        if text.ends_with(' ') {
            text.pop();
            text.push(NBSP);
        }
        space_before = text.ends_with(NBSP);
    }
    if space_before {
        return;
    }
    if let Some(text) = segments.get_mut(index).and_then(Segment::text_mut) {
        if text.starts_with(' ') {
            text.replace_range(..1, &NBSP.to_string());
        }
    }
}

/// Remove one grapheme from the start (forward) or end (backward).
fn remove_grapheme(text: &mut String, direction: DeleteDirection) {
    match direction {
        DeleteDirection::Forward => {
            let first = text.graphemes(true).next().map_or(0, str::len);
            text.replace_range(..first, "");
        }
        DeleteDirection::Backward => {
            let last = text.graphemes(true).next_back().map_or(0, str::len);
            text.truncate(text.len() - last);
        }
    }
}

/// Delete the segment at `index` of `paragraph`.
///
/// Without a direction a selected segment is removed whole; with a
/// direction a text segment loses one grapheme from that end instead.
/// Undeletable entities stay in place unless `undeletable` is given, in
/// which case they are moved into it. Returns `false` when the segment
/// kind has no deletion rule for the request.
pub fn delete_segment(
    paragraph: &mut Paragraph,
    index: usize,
    context: Option<&mut FormatContext>,
    direction: Option<DeleteDirection>,
    undeletable: Option<&mut Vec<Segment>>,
) -> bool {
    let paragraph = mutate_block(paragraph);
    let preserve_white_space = paragraph.format.is_white_space_preserved();
    let segments = &mut paragraph.segments;
    let before = segments.len();
    let Some(segment) = segments.get_mut(index) else {
        return false;
    };

    let handled = match &mut segment.kind {
        SegmentKind::Br | SegmentKind::Image(_) | SegmentKind::SelectionMarker => {
            segments.remove(index);
            true
        }
        SegmentKind::Entity(entity) => {
            if let Some(operation) = entity_operation(segment.is_selected, direction) {
                let deleted = DeletedEntity {
                    entity: entity.clone(),
                    operation,
                };
                let taken = if !entity.entity_format.is_undeletable {
                    segments.remove(index);
                    true
                } else if let Some(collector) = undeletable {
                    collector.push(segments.remove(index));
                    true
                } else {
                    false
                };
                if let (true, Some(context)) = (taken, context) {
                    context.deleted_entities.push(deleted);
                }
            }
            true
        }
        SegmentKind::General(_) => {
            if !segment.is_selected {
                return false;
            }
            segments.remove(index);
            true
        }
        SegmentKind::Text { text } => {
            if text.is_empty() || segment.is_selected {
                segments.remove(index);
            } else if let Some(direction) = direction {
                remove_grapheme(text, direction);
                if text.is_empty() {
                    segments.remove(index);
                } else if !preserve_white_space {
                    match direction {
                        DeleteDirection::Forward => protect_edge_spaces(segments, index),
                        DeleteDirection::Backward => protect_edge_spaces(segments, index + 1),
                    }
                }
            }
            true
        }
    };

    if segments.len() < before && !preserve_white_space {
        protect_edge_spaces(segments, index);
    }
    handled
}
