//! Plain text extraction from a content model.
//!
//! Each paragraph becomes one line; lines are joined with the configured
//! separator. An `hr` divider becomes a row of underscores, any other
//! divider an empty line, and entities contribute their text content.

use super::options::{TextOptions, HR_TEXT};
use super::visitor::{DefaultVisitor, TextVisitor, VisitorAction};
use crate::model::{Block, BlockGroupContainer, Paragraph, SegmentKind};

/// Convert a content model (or any block group in it) to plain text.
pub fn content_model_to_text(group: &dyn BlockGroupContainer, options: &TextOptions) -> String {
    content_model_to_text_with_visitor(group, options, &mut DefaultVisitor)
}

/// [`content_model_to_text`], letting `visitor` skip or replace elements.
pub fn content_model_to_text_with_visitor(
    group: &dyn BlockGroupContainer,
    options: &TextOptions,
    visitor: &mut dyn TextVisitor,
) -> String {
    let mut lines = Vec::new();
    collect_lines(group, options, visitor, &mut lines);
    lines.join(&options.separator)
}

/// Push the text for `action`, or `default()` when the visitor continues.
fn apply_action(action: VisitorAction, out: &mut Vec<String>, default: impl FnOnce() -> String) {
    match action {
        VisitorAction::Continue => out.push(default()),
        VisitorAction::Replace(text) => out.push(text),
        VisitorAction::Skip => {}
    }
}

fn collect_lines(
    group: &dyn BlockGroupContainer,
    options: &TextOptions,
    visitor: &mut dyn TextVisitor,
    lines: &mut Vec<String>,
) {
    for block in group.blocks() {
        match block {
            Block::Paragraph(paragraph) => {
                let action = visitor.visit_paragraph(paragraph);
                apply_action(action, lines, || paragraph_text(paragraph, options, visitor));
            }
            Block::Divider(divider) => {
                let action = visitor.visit_divider(divider);
                apply_action(action, lines, || {
                    if divider.tag_name == "hr" {
                        HR_TEXT.to_string()
                    } else {
                        String::new()
                    }
                });
            }
            Block::Entity(entity) => {
                let action = visitor.visit_entity(&entity.entity);
                apply_action(action, lines, || entity.entity.wrapper.text_content());
            }
            Block::Table(table) => match visitor.visit_table(table) {
                VisitorAction::Continue => {
                    for cell in table.rows.iter().flat_map(|row| &row.cells) {
                        if options.include_span_cells || !(cell.span_left || cell.span_above) {
                            collect_lines(cell, options, visitor, lines);
                        }
                    }
                }
                VisitorAction::Replace(text) => lines.push(text),
                VisitorAction::Skip => {}
            },
            Block::BlockGroup(inner) => collect_lines(inner, options, visitor, lines),
        }
    }
}

fn paragraph_text(
    paragraph: &Paragraph,
    options: &TextOptions,
    visitor: &mut dyn TextVisitor,
) -> String {
    let mut text = String::new();
    let segments = &paragraph.segments;
    for (index, segment) in segments.iter().enumerate() {
        let mut parts = Vec::new();
        match &segment.kind {
            SegmentKind::Text { text: content } => text.push_str(content),
            SegmentKind::Br => {
                // A trailing Br only ends the line.
                if segments[index + 1..].iter().any(|s| !s.is_marker()) {
                    text.push_str(&options.separator);
                }
            }
            SegmentKind::Image(image) => {
                let action = visitor.visit_image(image);
                apply_action(action, &mut parts, || options.image_placeholder.clone());
            }
            SegmentKind::Entity(entity) => {
                let action = visitor.visit_entity(entity);
                apply_action(action, &mut parts, || entity.wrapper.text_content());
            }
            SegmentKind::General(general) => {
                parts.push(content_model_to_text_with_visitor(general, options, visitor));
            }
            SegmentKind::SelectionMarker => {}
        }
        text.extend(parts);
    }
    text
}
