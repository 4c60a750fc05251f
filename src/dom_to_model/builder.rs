//! Helpers that append blocks and segments to the group being built.

use super::context::DomToModelContext;
use crate::dom::{DomPoint, NodeId};
use crate::model::creators::{create_paragraph, create_selection_marker, create_text};
use crate::model::{
    is_white_space_preserved, Block, BlockFormat, BlockGroupContainer, Paragraph, Segment,
    SegmentKind,
};

/// The trailing paragraph of `group`, opening an implicit one when the
/// last block is anything else.
pub(crate) fn ensure_paragraph<'g>(
    group: &'g mut dyn BlockGroupContainer,
    format: &BlockFormat,
) -> Option<&'g mut Paragraph> {
    let blocks = group.blocks_mut();
    if !matches!(blocks.last(), Some(Block::Paragraph(_))) {
        blocks.push(create_paragraph(true, Some(format), None, None).into());
    }
    blocks.last_mut().and_then(Block::as_paragraph_mut)
}

/// Append a block.
pub(crate) fn add_block(group: &mut dyn BlockGroupContainer, block: impl Into<Block>) {
    group.blocks_mut().push(block.into());
}

/// Append an implicit empty paragraph so inline content following a block
/// element does not join the block's own paragraph.
pub(crate) fn close_block(group: &mut dyn BlockGroupContainer, format: &BlockFormat) {
    add_block(group, create_paragraph(true, Some(format), None, None));
}

/// Append a segment to the trailing paragraph. A selected segment absorbs
/// a selection marker right before it; a marker after a selected segment
/// is dropped. Returns the index the segment landed at.
pub(crate) fn add_segment(
    group: &mut dyn BlockGroupContainer,
    segment: Segment,
    format: &BlockFormat,
) -> Option<usize> {
    let paragraph = ensure_paragraph(group, format)?;
    let last_selected = paragraph.segments.last().map(|s| (s.is_marker(), s.is_selected));

    if segment.is_marker() {
        if segment.is_selected && matches!(last_selected, Some((_, true))) {
            return None;
        }
    } else if segment.is_selected && last_selected == Some((true, true)) {
        paragraph.segments.pop();
    }
    paragraph.segments.push(segment);
    Some(paragraph.segments.len() - 1)
}

/// Attach the link and code decorators in effect.
pub(crate) fn add_decorators(segment: &mut Segment, context: &DomToModelContext<'_>) {
    segment.link = context.link.clone();
    segment.code = context.code.clone();
}

/// Append a selection marker at `point`, stamping any pending format.
pub(crate) fn add_selection_marker(
    group: &mut dyn BlockGroupContainer,
    context: &DomToModelContext<'_>,
    point: DomPoint,
) {
    let mut format = context.segment_format.clone();
    if let Some(pending) = context.pending_format_at(point) {
        format.overlay(pending);
    }
    let mut marker = create_selection_marker(Some(&format));
    add_decorators(&mut marker, context);
    add_segment(group, marker, &context.block_format);
}

fn has_spaces_only(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Append text read from `node`, merging into the previous text segment
/// when format, decorators and selection state all match.
pub(crate) fn add_text_segment(
    group: &mut dyn BlockGroupContainer,
    text: &str,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    if text.is_empty() {
        return;
    }

    let preserved = is_white_space_preserved(context.block_format.white_space.as_deref());
    let merged = {
        let paragraph = match group.blocks_mut().last_mut() {
            Some(Block::Paragraph(paragraph)) => Some(paragraph),
            _ => None,
        };
        match paragraph {
            Some(paragraph) => {
                let can_merge = paragraph.segments.last().is_some_and(|last| {
                    matches!(last.kind, SegmentKind::Text { .. })
                        && last.is_selected == context.is_in_selection
                        && last.format == context.segment_format
                        && last.link == context.link
                        && last.code == context.code
                });
                if can_merge {
                    if let Some(existing) = paragraph.segments.last_mut().and_then(Segment::text_mut) {
                        existing.push_str(text);
                    }
                    Some(paragraph.segments.len() - 1)
                } else if has_spaces_only(text)
                    && paragraph.segments.is_empty()
                    && !preserved
                    && !paragraph.format.is_white_space_preserved()
                {
                    return;
                } else {
                    None
                }
            }
            None if has_spaces_only(text) && !preserved => return,
            None => None,
        }
    };

    let index = match merged {
        Some(index) => Some(index),
        None => {
            let mut segment = create_text(text, Some(&context.segment_format), None, None);
            segment.is_selected = context.is_in_selection;
            add_decorators(&mut segment, context);
            add_segment(group, segment, &context.block_format)
        }
    };

    if let (Some(index), Some(indexer)) = (index, context.indexer.as_deref_mut()) {
        if let Some(Block::Paragraph(paragraph)) = group.blocks().last() {
            indexer.on_segment(node, paragraph, index);
        }
    }
}
