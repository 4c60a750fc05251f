//! Structural normalization.
//!
//! Normalization makes the model canonical: whitespace spelled out the way
//! a renderer would show it, tables rectangular with sane sizes, and no
//! empty blocks left behind by editing. Every pass is idempotent.

mod paragraph;
mod segment;
mod table;

pub use paragraph::normalize_paragraph;
pub use segment::normalize_segments;
pub use table::{
    default_column_width, normalize_table, MIN_COLUMN_WIDTH, MIN_ROW_HEIGHT,
};

pub(crate) use segment::NBSP;

use crate::model::{Block, BlockGroupContainer, Document, SegmentFormat, SegmentKind};

/// Normalize every paragraph and table below `group` and drop blocks left
/// empty, bottom-up.
pub fn normalize_content_model(group: &mut dyn BlockGroupContainer) {
    normalize_group(group, None);
}

/// [`normalize_content_model`] for a whole document; new table cell
/// content takes the document's default format.
pub fn normalize_document(document: &mut Document) {
    log::trace!("normalizing document with {} blocks", document.blocks.len());
    let default_format = document.format.clone();
    let format = (!default_format.is_empty()).then_some(&default_format);
    normalize_group(document, format);
}

fn normalize_group(group: &mut dyn BlockGroupContainer, default_format: Option<&SegmentFormat>) {
    for block in group.blocks_mut().iter_mut() {
        match block {
            Block::Paragraph(paragraph) => {
                for segment in &mut paragraph.segments {
                    if let SegmentKind::General(general) = &mut segment.kind {
                        normalize_group(general, default_format);
                    }
                }
                normalize_paragraph(paragraph);
            }
            Block::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        normalize_group(cell, default_format);
                    }
                }
                normalize_table(table, default_format);
            }
            Block::BlockGroup(inner) => normalize_group(inner, default_format),
            Block::Divider(_) | Block::Entity(_) => {}
        }
    }

    let blocks = group.blocks_mut();
    let before = blocks.len();
    blocks.retain(|block| !block.is_empty());
    if blocks.len() != before {
        log::trace!("dropped {} empty blocks", before - blocks.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::*;
    use crate::model::BlockGroup;

    #[test]
    fn test_empty_blocks_dropped_bottom_up() {
        let mut quote = create_format_container("blockquote", None);
        quote.blocks.push(create_paragraph(true, None, None, None).into());

        let mut document = create_document(None);
        document.blocks.push(create_paragraph(true, None, None, None).into());
        document.blocks.push(BlockGroup::FormatContainer(quote).into());
        document.blocks.push(create_divider("hr", None).into());
        document.blocks.push(create_table(0, None).into());

        normalize_content_model(&mut document);
        assert_eq!(document.blocks.len(), 1);
        assert!(matches!(document.blocks[0], Block::Divider(_)));
    }

    #[test]
    fn test_table_cells_filled_with_default_format() {
        let mut table = create_table(1, None);
        table.rows[0]
            .cells
            .push(create_table_cell(false, false, false, None, None));

        let format = crate::model::SegmentFormat {
            font_family: Some("Calibri".into()),
            ..Default::default()
        };
        let mut document = create_document(Some(&format));
        document.blocks.push(table.into());

        normalize_document(&mut document);
        let table = document.blocks[0].as_table().unwrap();
        let paragraph = table.rows[0].cells[0].blocks[0].as_paragraph().unwrap();
        assert!(paragraph.segments[0].is_br());
        assert_eq!(paragraph.segments[0].format.font_family.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_document_normalization_is_idempotent() {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text("  hello  ", None, None, None));
        paragraph.segments.push(create_br(None));
        let mut document = create_document(None);
        document.blocks.push(paragraph.into());
        document.blocks.push(create_table(1, None).into());

        normalize_document(&mut document);
        let once = document.clone();
        normalize_document(&mut document);
        assert_eq!(document, once);
    }
}
