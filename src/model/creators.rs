//! Node factories.
//!
//! Each creator returns a fresh node built from the caller's partial format
//! (cloned, never aliased) merged over the variant defaults.

use super::block::{Divider, EntityBlock, Paragraph};
use super::decorator::{Code, Link, ParagraphDecorator};
use super::foreign::{ElementShell, ForeignNode};
use super::format::{
    BlockFormat, CodeFormat, Dataset, EntityFormat, LinkFormat, ListLevelFormat, SegmentFormat,
};
use super::group::{Document, FormatContainer, GeneralBlock, ListItem, ListLevel, ListType};
use super::segment::{Entity, GeneralSegment, Image, Segment, SegmentKind};
use super::table::{Table, TableCell, TableRow};

fn segment(kind: SegmentKind, format: Option<&SegmentFormat>) -> Segment {
    let mut segment = Segment::new(kind);
    if let Some(format) = format {
        segment.format = format.clone();
    }
    segment
}

pub fn create_document(default_format: Option<&SegmentFormat>) -> Document {
    Document {
        blocks: Vec::new(),
        format: default_format.cloned().unwrap_or_default(),
    }
}

pub fn create_paragraph(
    is_implicit: bool,
    format: Option<&BlockFormat>,
    segment_format: Option<&SegmentFormat>,
    decorator: Option<&ParagraphDecorator>,
) -> Paragraph {
    Paragraph {
        segments: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        segment_format: segment_format.cloned().unwrap_or_default(),
        is_implicit,
        decorator: decorator.cloned(),
        cached_element: None,
    }
}

pub fn create_text(
    text: impl Into<String>,
    format: Option<&SegmentFormat>,
    link: Option<&Link>,
    code: Option<&Code>,
) -> Segment {
    let mut text = segment(SegmentKind::Text { text: text.into() }, format);
    text.link = link.cloned();
    text.code = code.cloned();
    text
}

pub fn create_br(format: Option<&SegmentFormat>) -> Segment {
    segment(SegmentKind::Br, format)
}

pub fn create_image(src: impl Into<String>, format: Option<&SegmentFormat>) -> Segment {
    segment(
        SegmentKind::Image(Image {
            src: src.into(),
            ..Default::default()
        }),
        format,
    )
}

pub fn create_selection_marker(format: Option<&SegmentFormat>) -> Segment {
    let mut marker = segment(SegmentKind::SelectionMarker, format);
    marker.is_selected = true;
    marker
}

pub fn create_general_segment(element: ElementShell, format: Option<&SegmentFormat>) -> Segment {
    segment(
        SegmentKind::General(GeneralSegment {
            element,
            blocks: Vec::new(),
        }),
        format,
    )
}

pub fn create_general_block(element: ElementShell) -> GeneralBlock {
    GeneralBlock {
        element,
        ..Default::default()
    }
}

/// Build an entity. `is_readonly` defaults to true, as entity content is
/// owned by its plugin.
pub fn create_entity(
    wrapper: ForeignNode,
    is_readonly: Option<bool>,
    entity_type: Option<&str>,
    id: Option<&str>,
) -> Entity {
    Entity {
        entity_format: EntityFormat {
            entity_type: entity_type.map(str::to_string),
            id: id.map(str::to_string),
            is_readonly: is_readonly.unwrap_or(true),
            ..Default::default()
        },
        wrapper,
    }
}

pub fn create_entity_segment(entity: Entity, format: Option<&SegmentFormat>) -> Segment {
    segment(SegmentKind::Entity(entity), format)
}

pub fn create_entity_block(entity: Entity, format: Option<&SegmentFormat>) -> EntityBlock {
    EntityBlock {
        entity,
        format: format.cloned().unwrap_or_default(),
        is_selected: false,
    }
}

pub fn create_divider(tag_name: &str, format: Option<&BlockFormat>) -> Divider {
    Divider {
        tag_name: tag_name.to_string(),
        format: format.cloned().unwrap_or_default(),
        is_selected: false,
        cached_element: None,
    }
}

/// Build a table with `row_count` empty rows.
pub fn create_table(row_count: usize, format: Option<&BlockFormat>) -> Table {
    Table {
        rows: (0..row_count).map(|_| create_table_row(None, 0.0)).collect(),
        widths: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        ..Default::default()
    }
}

pub fn create_table_row(format: Option<&BlockFormat>, height: f32) -> TableRow {
    TableRow {
        height,
        format: format.cloned().unwrap_or_default(),
        cells: Vec::new(),
        cached_element: None,
    }
}

pub fn create_table_cell(
    span_left: bool,
    span_above: bool,
    is_header: bool,
    format: Option<&BlockFormat>,
    dataset: Option<&Dataset>,
) -> TableCell {
    TableCell {
        blocks: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        span_left,
        span_above,
        is_header,
        is_selected: false,
        dataset: dataset.cloned().unwrap_or_default(),
        cached_element: None,
    }
}

/// Build a list item. The format holder marker starts unselected.
pub fn create_list_item(levels: &[ListLevel], format: Option<&SegmentFormat>) -> ListItem {
    let mut format_holder = create_selection_marker(format);
    format_holder.is_selected = false;
    ListItem {
        blocks: Vec::new(),
        levels: levels
            .iter()
            .map(|level| ListLevel {
                cached_element: None,
                ..level.clone()
            })
            .collect(),
        format_holder,
        format: BlockFormat::default(),
        cached_element: None,
    }
}

pub fn create_list_level(
    list_type: ListType,
    format: Option<&ListLevelFormat>,
    dataset: Option<&Dataset>,
) -> ListLevel {
    ListLevel {
        list_type,
        format: format.cloned().unwrap_or_default(),
        dataset: dataset.cloned().unwrap_or_default(),
        cached_element: None,
    }
}

pub fn create_format_container(tag_name: &str, format: Option<&BlockFormat>) -> FormatContainer {
    FormatContainer {
        tag_name: tag_name.to_string(),
        blocks: Vec::new(),
        format: format.cloned().unwrap_or_default(),
        cached_element: None,
    }
}

pub fn create_paragraph_decorator(
    tag_name: &str,
    format: Option<&SegmentFormat>,
) -> ParagraphDecorator {
    ParagraphDecorator {
        tag_name: tag_name.to_ascii_lowercase(),
        format: format.cloned().unwrap_or_default(),
    }
}

pub fn create_link(format: LinkFormat, dataset: Option<&Dataset>) -> Link {
    Link {
        format,
        dataset: dataset.cloned().unwrap_or_default(),
    }
}

pub fn create_code(font_family: Option<&str>) -> Code {
    Code {
        format: CodeFormat {
            font_family: font_family.map(str::to_string),
        },
    }
}

/// A paragraph holding a single Br, the default content of an empty cell.
pub fn create_empty_paragraph(format: Option<&SegmentFormat>) -> Paragraph {
    let mut paragraph = create_paragraph(false, None, None, None);
    paragraph.segments.push(create_br(format));
    paragraph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creators_clone_formats() {
        let format = SegmentFormat {
            font_size: Some("12pt".into()),
            ..Default::default()
        };
        let mut text = create_text("a", Some(&format), None, None);
        text.format.font_size = Some("20pt".into());
        assert_eq!(format.font_size.as_deref(), Some("12pt"));
    }

    #[test]
    fn test_marker_is_selected_holder_is_not() {
        let marker = create_selection_marker(None);
        assert!(marker.is_selected);

        let level = create_list_level(ListType::Ordered, None, None);
        let item = create_list_item(&[level], None);
        assert!(item.format_holder.is_marker());
        assert!(!item.format_holder.is_selected);
        assert_eq!(item.levels.len(), 1);
    }

    #[test]
    fn test_entity_defaults_to_readonly() {
        let entity = create_entity(ForeignNode::element("span"), None, Some("mention"), None);
        assert!(entity.entity_format.is_readonly);
        assert_eq!(entity.entity_format.entity_type.as_deref(), Some("mention"));
    }

    #[test]
    fn test_table_rows() {
        let table = create_table(3, None);
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows.iter().all(|r| r.cells.is_empty()));
    }
}
