//! Paragraph normalization.

use super::segment::normalize_segments;
use crate::model::creators::create_br;
use crate::model::mutation::mutate_block;
use crate::model::{Paragraph, Segment, SegmentFormat, SegmentKind};

/// Normalize one paragraph in place, dropping its cached render handle
/// when anything changed.
pub fn normalize_paragraph(paragraph: &mut Paragraph) {
    let original = paragraph.clone();

    if !paragraph.format.is_white_space_preserved() {
        normalize_segments(&mut paragraph.segments);
        paragraph.segments.retain(|s| !is_segment_empty(s));
    }

    // Runs on the pruned list so a removed tail can't leave a Br behind.
    if !paragraph.is_implicit && !paragraph.segments.is_empty() {
        fix_trailing_br(paragraph);

        let only_breaks = paragraph
            .segments
            .iter()
            .all(|s| s.is_br() || s.is_marker());
        if only_breaks {
            paragraph.format.white_space = None;
        }
    }

    remove_empty_links(paragraph);
    move_up_segment_format(paragraph);

    if *paragraph != original {
        mutate_block(paragraph);
    }
}

/// A lone trailing marker needs a Br to keep its line; a Br right after
/// content at the very end is redundant.
fn fix_trailing_br(paragraph: &mut Paragraph) {
    let segments = &mut paragraph.segments;
    let len = segments.len();
    let last = &segments[len - 1];
    let second_last_is_br = len < 2 || segments[len - 2].is_br();

    if last.is_marker() && second_last_is_br {
        let format = last.format.clone();
        segments.push(create_br(Some(&format)));
    } else if len > 1 && last.is_br() {
        let content: Vec<&Segment> = segments.iter().filter(|s| !s.is_marker()).collect();
        if content.len() > 1 && !content[content.len() - 2].is_br() {
            segments.pop();
        }
    }
}

fn is_segment_empty(segment: &Segment) -> bool {
    matches!(&segment.kind, SegmentKind::Text { text } if text.is_empty())
}

/// Drop the link of a marker that sits between unlinked neighbours of the
/// same format: the link would otherwise cover nothing.
fn remove_empty_links(paragraph: &mut Paragraph) {
    let Some(index) = paragraph.marker_index() else {
        return;
    };
    let segments = &paragraph.segments;
    let marker = &segments[index];
    if marker.link.is_none() {
        return;
    }

    let plain_same = |s: &Segment| s.link.is_none() && s.format == marker.format;
    let previous = index.checked_sub(1).map(|i| &segments[i]);
    let next = segments.get(index + 1);

    let unlink = match (previous, next) {
        (Some(previous), next) => plain_same(previous) && next.map_or(true, plain_same),
        (None, Some(next)) => plain_same(next),
        (None, None) => false,
    };
    if unlink {
        paragraph.segments[index].link = None;
    }
}

/// Copy font family, size and color shared by every non-marker segment
/// onto the paragraph's segment format. Decorated paragraphs keep their
/// own styling.
fn move_up_segment_format(paragraph: &mut Paragraph) {
    if paragraph.decorator.is_some() {
        return;
    }

    let segments: Vec<&SegmentFormat> = paragraph
        .segments
        .iter()
        .filter(|s| !s.is_marker())
        .map(|s| &s.format)
        .collect();
    let Some(first) = segments.first() else {
        return;
    };

    let shared = |field: fn(&SegmentFormat) -> &Option<String>| -> Option<String> {
        let value = field(first).as_ref()?;
        segments
            .iter()
            .all(|f| field(f).as_ref() == Some(value))
            .then(|| value.clone())
    };
    let font_family = shared(|f| &f.font_family);
    let font_size = shared(|f| &f.font_size);
    let text_color = shared(|f| &f.text_color);

    let target = &mut paragraph.segment_format;
    if font_family.is_some() {
        target.font_family = font_family;
    }
    if font_size.is_some() {
        target.font_size = font_size;
    }
    if text_color.is_some() {
        target.text_color = text_color;
    }
}
