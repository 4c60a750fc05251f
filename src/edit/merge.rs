//! Splicing one content model into another, as a paste does.
//!
//! The source is inserted at the caret of the target. Any selection the
//! target carries is deleted first, so a merge always overwrites it.

use super::delete_selection::delete_selection;
use super::format_context::FormatContext;
use crate::model::creators::{
    create_br, create_list_item, create_paragraph, create_selection_marker, create_table_cell,
    create_table_row,
};
use crate::model::mutation::mutate_block;
use crate::model::path::{resolve_group, resolve_group_mut, PathStep};
use crate::model::selection::{clear_selection, find_insert_point, InsertPoint};
use crate::model::{
    Block, BlockGroup, BlockGroupContainer, BlockGroupType, Document, ListItem, ListLevel,
    Paragraph, Segment, SegmentFormat, SegmentKind, Table, TableCell,
};
use crate::normalize::normalize_document;

/// How the target's default format is pushed into merged content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeFormatPolicy {
    /// Source formats are kept as they are
    #[default]
    None,
    /// The default format fills fields the source leaves unset
    MergeAll,
    /// The default format wins, except the source's bold, italic and
    /// underline; block background colors are dropped
    KeepSourceEmphasisFormat,
}

/// Options for [`merge_model`].
#[derive(Debug, Clone, Default)]
pub struct MergeModelOptions {
    pub merge_format: MergeFormatPolicy,
    /// Merge a lone source table cell by cell into the table holding the
    /// caret
    pub merge_table: bool,
    /// Insert here instead of at the target's selection
    pub insert_position: Option<InsertPoint>,
    /// Start a new paragraph after the merged content
    pub add_paragraph_after_merged_content: bool,
}

impl MergeModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_merge_format(mut self, policy: MergeFormatPolicy) -> Self {
        self.merge_format = policy;
        self
    }

    pub fn with_merge_table(mut self, merge: bool) -> Self {
        self.merge_table = merge;
        self
    }

    pub fn with_insert_position(mut self, point: InsertPoint) -> Self {
        self.insert_position = Some(point);
        self
    }

    pub fn with_paragraph_after(mut self, add: bool) -> Self {
        self.add_paragraph_after_merged_content = add;
        self
    }
}

/// Merge `source` into `target` and return the caret after the merged
/// content.
///
/// Returns `None` when the target has nowhere to insert: no caret and no
/// `insert_position`.
pub fn merge_model(
    target: &mut Document,
    mut source: Document,
    mut context: Option<&mut FormatContext>,
    options: &MergeModelOptions,
) -> Option<InsertPoint> {
    log::debug!("merging {} blocks", source.blocks.len());

    let insert_position = match &options.insert_position {
        Some(point) => Some(point.clone()),
        None => delete_selection(target, &[], context.as_deref_mut()).insert_point,
    };
    let Some(mut point) = insert_position else {
        log::debug!("merge target has no insert point");
        return None;
    };

    let marker_format = marker_format(target, &point);
    if options.merge_format != MergeFormatPolicy::None {
        let mut default_format = target.format.clone();
        default_format.overlay(&marker_format);
        apply_default_format(&mut source, &default_format, options.merge_format);
    }

    clear_selection(&mut source);
    if let Some(context) = context.as_deref_mut() {
        report_new_content(&source.blocks, context);
    }

    let merge_single_table = options.merge_table
        && point.table_context.is_some()
        && matches!(source.blocks.as_slice(), [Block::Table(_)]);

    for (index, block) in source.blocks.into_iter().enumerate() {
        match block {
            Block::Paragraph(paragraph) => {
                if index > 0 {
                    split_paragraph(target, &mut point);
                }
                merge_paragraph(target, &mut point, paragraph);
            }
            Block::Table(table) if merge_single_table => {
                merge_table(target, &mut point, table, &marker_format);
            }
            Block::BlockGroup(BlockGroup::ListItem(item)) => merge_list(target, &mut point, item),
            block @ (Block::Table(_) | Block::Divider(_) | Block::Entity(_) | Block::BlockGroup(_)) => {
                insert_block(target, &mut point, block)
            }
        }
    }

    if options.add_paragraph_after_merged_content && !options.merge_table {
        split_paragraph(target, &mut point);
    }

    normalize_document(target);
    find_insert_point(target)
}

/// Split the paragraph holding the caret at the marker.
///
/// Segments from the marker on move into a new paragraph right after the
/// original, and `point` moves with the marker. When the paragraph sits
/// directly in a list item, the list item is split too and the new item
/// shares its levels.
pub fn split_paragraph(root: &mut dyn BlockGroupContainer, point: &mut InsertPoint) {
    let Some(group) = resolve_group_mut(root, &point.path) else {
        return;
    };
    let blocks = group.blocks_mut();
    let Some(paragraph) = blocks
        .get_mut(point.paragraph_index)
        .and_then(Block::as_paragraph_mut)
    else {
        return;
    };
    let paragraph = mutate_block(paragraph);

    let mut tail = create_paragraph(
        false,
        Some(&paragraph.format),
        Some(&paragraph.segment_format),
        paragraph.decorator.as_ref(),
    );
    let split_at = point.marker_index.min(paragraph.segments.len());
    tail.segments = paragraph.segments.split_off(split_at);
    if tail.segments.is_empty() {
        tail.segments.push(create_br(None));
    }
    paragraph.is_implicit = false;

    blocks.insert(point.paragraph_index + 1, tail.into());
    point.paragraph_index += 1;
    point.marker_index = 0;

    split_list_item(root, point);
}

fn split_list_item(root: &mut dyn BlockGroupContainer, point: &mut InsertPoint) {
    let Some((parent_path, PathStep::Block(list_index))) = point.path.split_last() else {
        return;
    };
    let Some(parent) = resolve_group_mut(root, &parent_path) else {
        return;
    };
    let blocks = parent.blocks_mut();
    let Some(Block::BlockGroup(BlockGroup::ListItem(item))) = blocks.get_mut(list_index) else {
        return;
    };

    let item = mutate_block(item);
    let mut new_item = create_list_item(&item.levels, Some(&item.format_holder.format));
    new_item.format = item.format.clone();
    new_item.blocks = item.blocks.split_off(point.paragraph_index);

    blocks.insert(list_index + 1, BlockGroup::ListItem(new_item).into());
    point.path = parent_path.child(PathStep::Block(list_index + 1));
    point.paragraph_index = 0;
}

fn marker_format(target: &Document, point: &InsertPoint) -> SegmentFormat {
    resolve_group(target, &point.path)
        .and_then(|group| group.blocks().get(point.paragraph_index))
        .and_then(Block::as_paragraph)
        .and_then(|paragraph| paragraph.segments.get(point.marker_index))
        .map(|marker| marker.format.clone())
        .unwrap_or_default()
}

/// Splice the source paragraph's segments in at the marker.
fn merge_paragraph(root: &mut dyn BlockGroupContainer, point: &mut InsertPoint, source: Paragraph) {
    let Some(paragraph) = point.paragraph_mut(root) else {
        return;
    };

    let mut segments = source.segments;
    if let Some(decorator) = &source.decorator {
        if decorator.heading_level().is_some() {
            for segment in &mut segments {
                strip_heading_duplicates(&mut segment.format, &decorator.format);
            }
        }
        paragraph.decorator = Some(decorator.clone());
    }

    let at = point.marker_index.min(paragraph.segments.len());
    let count = segments.len();
    paragraph.segments.splice(at..at, segments);
    point.marker_index = at + count;
}

/// Drop font fields a heading already implies.
fn strip_heading_duplicates(format: &mut SegmentFormat, heading: &SegmentFormat) {
    if format.font_weight.is_some() && format.font_weight == heading.font_weight {
        format.font_weight = None;
    }
    if format.font_size.is_some() && format.font_size == heading.font_size {
        format.font_size = None;
    }
    if format.font_family.is_some() && format.font_family == heading.font_family {
        format.font_family = None;
    }
}

/// Split at the marker and put `block` between the two halves.
fn insert_block(root: &mut dyn BlockGroupContainer, point: &mut InsertPoint, block: Block) {
    split_paragraph(root, point);
    let Some(group) = resolve_group_mut(root, &point.path) else {
        return;
    };
    let blocks = group.blocks_mut();
    let at = point.paragraph_index.min(blocks.len());
    blocks.insert(at, block);
    point.paragraph_index = at + 1;
}

/// Insert a list item after the one holding the caret, adopting the levels
/// of the list it joins.
fn merge_list(root: &mut dyn BlockGroupContainer, point: &mut InsertPoint, mut item: ListItem) {
    split_paragraph(root, point);

    let in_list = resolve_group(&*root, &point.path)
        .is_some_and(|group| group.group_type() == BlockGroupType::ListItem);
    let list_step = match point.path.split_last() {
        Some((parent_path, PathStep::Block(list_index))) if in_list => Some((parent_path, list_index)),
        _ => None,
    };

    let Some((parent_path, list_index)) = list_step else {
        insert_block(root, point, BlockGroup::ListItem(item).into());
        return;
    };
    let Some(parent) = resolve_group_mut(root, &parent_path) else {
        return;
    };
    let blocks = parent.blocks_mut();
    if let Some(Block::BlockGroup(BlockGroup::ListItem(existing))) = blocks.get(list_index) {
        for (depth, level) in existing.levels.iter().enumerate() {
            let level = ListLevel {
                cached_element: None,
                ..level.clone()
            };
            match item.levels.get_mut(depth) {
                Some(slot) => *slot = level,
                None => item.levels.push(level),
            }
        }
    }
    blocks.insert(list_index, BlockGroup::ListItem(item).into());
    point.path = parent_path.child(PathStep::Block(list_index + 1));
}

/// Lay the source table's cells over the target table starting at the
/// caret cell, growing the grid as needed.
fn merge_table(
    root: &mut dyn BlockGroupContainer,
    point: &mut InsertPoint,
    source: Table,
    marker_format: &SegmentFormat,
) {
    let Some(table_context) = point.table_context.clone() else {
        return;
    };
    let Some(group) = resolve_group_mut(root, &table_context.table_path) else {
        return;
    };
    let Some(table) = group
        .blocks_mut()
        .get_mut(table_context.table_index)
        .and_then(Block::as_table_mut)
    else {
        return;
    };
    let table = mutate_block(table);

    let (row_start, col_start) = (table_context.row, table_context.col);
    for (i, source_row) in source.rows.into_iter().enumerate() {
        let row_index = row_start + i;
        if row_index >= table.rows.len() {
            add_row_like_above(table, row_index);
        }
        for (j, mut cell) in source_row.cells.into_iter().enumerate() {
            let col_index = col_start + j;
            if col_index >= table.column_count() {
                add_column_like_left(table, col_index);
            }
            if i == 0 && j == 0 {
                put_marker(&mut cell, marker_format);
            }
            if let Some(slot) = table.cell_mut(row_index, col_index) {
                cell.is_selected = slot.is_selected;
                *slot = cell;
            }
        }
    }

    let Some(cell) = table.cell(row_start, col_start) else {
        return;
    };
    let paragraph_index = cell.blocks.len().saturating_sub(1);
    let marker_index = cell
        .blocks
        .last()
        .and_then(Block::as_paragraph)
        .and_then(Paragraph::marker_index)
        .unwrap_or(0);

    point.path = table_context.table_path.child(PathStep::TableCell {
        block: table_context.table_index,
        row: row_start,
        col: col_start,
    });
    point.paragraph_index = paragraph_index;
    point.marker_index = marker_index;
}

fn add_row_like_above(table: &mut Table, row_index: usize) {
    let column_count = table.column_count();
    while table.rows.len() <= row_index {
        let above = table.rows.last();
        let mut row = create_table_row(above.map(|r| &r.format), above.map_or(0.0, |r| r.height));
        row.cells = (0..column_count)
            .map(|col| {
                let above = table.rows.last().and_then(|r| r.cells.get(col));
                inherited_cell(above)
            })
            .collect();
        table.rows.push(row);
    }
}

fn add_column_like_left(table: &mut Table, col_index: usize) {
    for row in &mut table.rows {
        while row.cells.len() <= col_index {
            let left = row.cells.last().cloned();
            row.cells.push(inherited_cell(left.as_ref()));
        }
    }
}

fn inherited_cell(neighbor: Option<&TableCell>) -> TableCell {
    create_table_cell(
        false,
        false,
        neighbor.is_some_and(|cell| cell.is_header),
        neighbor.map(|cell| &cell.format),
        None,
    )
}

/// Put a selected marker at the end of the cell's last paragraph.
fn put_marker(cell: &mut TableCell, format: &SegmentFormat) {
    let marker = create_selection_marker(Some(format));
    match cell.blocks.last_mut() {
        Some(Block::Paragraph(paragraph)) => paragraph.segments.push(marker),
        _ => {
            let mut paragraph = create_paragraph(true, None, None, None);
            paragraph.segments.push(marker);
            cell.blocks.push(paragraph.into());
        }
    }
}

fn apply_default_format(
    group: &mut dyn BlockGroupContainer,
    default_format: &SegmentFormat,
    policy: MergeFormatPolicy,
) {
    for block in group.blocks_mut() {
        match block {
            Block::Paragraph(paragraph) => {
                if policy == MergeFormatPolicy::KeepSourceEmphasisFormat {
                    paragraph.format.background_color = None;
                }
                for segment in &mut paragraph.segments {
                    apply_segment_default(segment, default_format, policy);
                }
            }
            Block::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        apply_default_format(cell, default_format, policy);
                    }
                }
            }
            Block::BlockGroup(inner) => {
                if let BlockGroup::ListItem(item) = &mut *inner {
                    apply_format_policy(&mut item.format_holder.format, default_format, policy);
                }
                apply_default_format(inner, default_format, policy);
            }
            Block::Divider(_) | Block::Entity(_) => {}
        }
    }
}

fn apply_segment_default(segment: &mut Segment, default_format: &SegmentFormat, policy: MergeFormatPolicy) {
    apply_format_policy(&mut segment.format, default_format, policy);
    if let SegmentKind::General(general) = &mut segment.kind {
        apply_default_format(general, default_format, policy);
    }
}

fn apply_format_policy(format: &mut SegmentFormat, default_format: &SegmentFormat, policy: MergeFormatPolicy) {
    match policy {
        MergeFormatPolicy::None => {}
        MergeFormatPolicy::MergeAll => format.fill_missing(default_format),
        MergeFormatPolicy::KeepSourceEmphasisFormat => {
            let emphasis = format.emphasis_format();
            *format = default_format.clone();
            format.overlay(&emphasis);
        }
    }
}

/// Report every entity and image the source brings in.
fn report_new_content(blocks: &[Block], context: &mut FormatContext) {
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => {
                for segment in &paragraph.segments {
                    match &segment.kind {
                        SegmentKind::Entity(entity) => context.new_entities.push(entity.clone()),
                        SegmentKind::Image(image) => context.new_images.push(image.clone()),
                        SegmentKind::General(general) => report_new_content(&general.blocks, context),
                        _ => {}
                    }
                }
            }
            Block::Entity(entity) => context.new_entities.push(entity.entity.clone()),
            Block::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| &row.cells) {
                    report_new_content(&cell.blocks, context);
                }
            }
            Block::BlockGroup(group) => report_new_content(group.blocks(), context),
            Block::Divider(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::*;
    use crate::model::path::GroupPath;
    use crate::model::{BlockFormat, ForeignNode, ListType, ParagraphDecorator};

    fn text_paragraph(text: &str) -> Paragraph {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text(text, None, None, None));
        paragraph
    }

    fn caret_document(before: &str, after: &str) -> Document {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text(before, None, None, None));
        paragraph.segments.push(create_selection_marker(None));
        paragraph.segments.push(create_text(after, None, None, None));
        let mut document = create_document(None);
        document.blocks.push(paragraph.into());
        document
    }

    fn paragraph_texts(group: &dyn BlockGroupContainer) -> Vec<String> {
        group
            .blocks()
            .iter()
            .filter_map(Block::as_paragraph)
            .map(Paragraph::text)
            .collect()
    }

    fn source_of(blocks: Vec<Block>) -> Document {
        let mut document = create_document(None);
        document.blocks = blocks;
        document
    }

    #[test]
    fn test_single_paragraph_spliced_at_caret() {
        let mut target = caret_document("ab", "cd");
        let source = source_of(vec![text_paragraph("XY").into()]);

        let point = merge_model(&mut target, source, None, &MergeModelOptions::new()).unwrap();
        assert_eq!(paragraph_texts(&target), vec!["abXYcd"]);
        let paragraph = target.blocks[0].as_paragraph().unwrap();
        assert!(paragraph.segments[point.marker_index].is_marker());
        assert_eq!(paragraph.segments[point.marker_index - 1].text(), Some("XY"));
    }

    #[test]
    fn test_second_paragraph_splits_target() {
        let mut target = caret_document("ab", "cd");
        let source = source_of(vec![text_paragraph("1").into(), text_paragraph("2").into()]);

        merge_model(&mut target, source, None, &MergeModelOptions::new());
        assert_eq!(paragraph_texts(&target), vec!["ab1", "2cd"]);
    }

    #[test]
    fn test_divider_inserted_between_halves() {
        let mut target = caret_document("ab", "cd");
        let source = source_of(vec![create_divider("hr", None).into()]);

        merge_model(&mut target, source, None, &MergeModelOptions::new());
        assert_eq!(target.blocks.len(), 3);
        assert!(matches!(target.blocks[1], Block::Divider(_)));
        assert_eq!(target.blocks[2].as_paragraph().unwrap().text(), "cd");
    }

    #[test]
    fn test_no_insert_point() {
        let mut target = source_of(vec![text_paragraph("a").into()]);
        let source = source_of(vec![text_paragraph("b").into()]);
        assert_eq!(merge_model(&mut target, source, None, &MergeModelOptions::new()), None);
        assert_eq!(paragraph_texts(&target), vec!["a"]);
    }

    #[test]
    fn test_selection_overwritten() {
        let mut selected = create_text("old", None, None, None);
        selected.is_selected = true;
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text("a", None, None, None));
        paragraph.segments.push(selected);
        let mut target = source_of(vec![paragraph.into()]);

        merge_model(
            &mut target,
            source_of(vec![text_paragraph("new").into()]),
            None,
            &MergeModelOptions::new(),
        );
        assert_eq!(paragraph_texts(&target), vec!["anew"]);
    }

    #[test]
    fn test_merge_all_fills_missing_fields() {
        let red = SegmentFormat {
            text_color: Some("red".into()),
            font_size: Some("10pt".into()),
            ..Default::default()
        };
        let mut target = caret_document("a", "");
        target.format = red;

        let blue = SegmentFormat {
            text_color: Some("blue".into()),
            ..Default::default()
        };
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text("b", Some(&blue), None, None));
        let options = MergeModelOptions::new().with_merge_format(MergeFormatPolicy::MergeAll);
        merge_model(&mut target, source_of(vec![paragraph.into()]), None, &options);

        let merged = &target.blocks[0].as_paragraph().unwrap().segments[1];
        assert_eq!(merged.format.text_color.as_deref(), Some("blue"));
        assert_eq!(merged.format.font_size.as_deref(), Some("10pt"));
    }

    #[test]
    fn test_keep_source_emphasis() {
        let mut target = caret_document("a", "");
        target.format = SegmentFormat {
            font_family: Some("Arial".into()),
            ..Default::default()
        };

        let source_format = SegmentFormat {
            font_family: Some("Courier".into()),
            font_weight: Some("bold".into()),
            ..Default::default()
        };
        let mut paragraph = create_paragraph(
            false,
            Some(&BlockFormat {
                background_color: Some("yellow".into()),
                ..Default::default()
            }),
            None,
            None,
        );
        paragraph.segments.push(create_text("b", Some(&source_format), None, None));
        let options =
            MergeModelOptions::new().with_merge_format(MergeFormatPolicy::KeepSourceEmphasisFormat);
        merge_model(&mut target, source_of(vec![paragraph.into()]), None, &options);

        let merged = &target.blocks[0].as_paragraph().unwrap().segments[1];
        assert_eq!(merged.format.font_family.as_deref(), Some("Arial"));
        assert_eq!(merged.format.font_weight.as_deref(), Some("bold"));
    }

    #[test]
    fn test_heading_duplicates_stripped() {
        let heading = SegmentFormat {
            font_weight: Some("bold".into()),
            font_size: Some("2em".into()),
            ..Default::default()
        };
        let decorator = create_paragraph_decorator("h1", Some(&heading));
        let mut paragraph = create_paragraph(false, None, None, Some(&decorator));
        let segment_format = SegmentFormat {
            font_weight: Some("bold".into()),
            font_size: Some("12pt".into()),
            ..Default::default()
        };
        paragraph.segments.push(create_text("T", Some(&segment_format), None, None));

        let mut target = caret_document("", "");
        merge_model(&mut target, source_of(vec![paragraph.into()]), None, &MergeModelOptions::new());

        let merged = target.blocks[0].as_paragraph().unwrap();
        assert_eq!(
            merged.decorator.as_ref().map(|d: &ParagraphDecorator| d.tag_name.as_str()),
            Some("h1")
        );
        let text = merged.segments.iter().find(|s| s.text() == Some("T")).unwrap();
        assert_eq!(text.format.font_weight, None);
        assert_eq!(text.format.font_size.as_deref(), Some("12pt"));
    }

    #[test]
    fn test_new_entities_and_images_reported() {
        let entity = create_entity(ForeignNode::element("span"), None, Some("mention"), None);
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_entity_segment(entity, None));
        paragraph.segments.push(create_image("x.png", None));

        let mut context = FormatContext::new();
        let mut target = caret_document("a", "");
        merge_model(
            &mut target,
            source_of(vec![paragraph.into()]),
            Some(&mut context),
            &MergeModelOptions::new(),
        );
        assert_eq!(context.new_entities.len(), 1);
        assert_eq!(context.new_images.len(), 1);
    }

    #[test]
    fn test_split_paragraph_in_list_item() {
        let levels = [create_list_level(ListType::Ordered, None, None)];
        let mut item = create_list_item(&levels, None);
        let mut paragraph = create_paragraph(true, None, None, None);
        paragraph.segments.push(create_text("ab", None, None, None));
        paragraph.segments.push(create_selection_marker(None));
        paragraph.segments.push(create_text("cd", None, None, None));
        item.blocks.push(paragraph.into());
        let mut document = source_of(vec![BlockGroup::ListItem(item).into()]);

        let mut point = find_insert_point(&document).unwrap();
        split_paragraph(&mut document, &mut point);

        assert_eq!(document.blocks.len(), 2);
        assert_eq!(point.path, GroupPath::root().child(PathStep::Block(1)));
        assert_eq!((point.paragraph_index, point.marker_index), (0, 0));
        let Block::BlockGroup(BlockGroup::ListItem(second)) = &document.blocks[1] else {
            panic!("expected list item");
        };
        assert_eq!(second.levels.len(), 1);
        assert_eq!(paragraph_texts(second), vec!["cd"]);
    }

    #[test]
    fn test_split_in_list_item_drops_cached_elements() {
        let mut dom = crate::dom::Dom::new();
        let mut level = create_list_level(ListType::Ordered, None, None);
        level.cached_element = Some(dom.create_element("ol"));
        let mut item = create_list_item(&[], None);
        item.levels.push(level);
        item.cached_element = Some(dom.create_element("li"));
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text("ab", None, None, None));
        paragraph.segments.push(create_selection_marker(None));
        paragraph.cached_element = Some(dom.create_element("div"));
        item.blocks.push(paragraph.into());
        let mut document = source_of(vec![BlockGroup::ListItem(item).into()]);

        let mut point = find_insert_point(&document).unwrap();
        split_paragraph(&mut document, &mut point);

        for block in &document.blocks {
            let Block::BlockGroup(BlockGroup::ListItem(item)) = block else {
                panic!("expected list item");
            };
            assert_eq!(item.cached_element, None);
            assert_eq!(item.levels[0].cached_element, None);
        }
        let Block::BlockGroup(BlockGroup::ListItem(head)) = &document.blocks[0] else {
            panic!("expected list item");
        };
        assert_eq!(head.blocks[0].as_paragraph().unwrap().cached_element, None);
    }

    #[test]
    fn test_list_item_adopts_existing_levels() {
        let levels = [create_list_level(ListType::Ordered, None, None)];
        let mut item = create_list_item(&levels, None);
        let mut paragraph = create_paragraph(true, None, None, None);
        paragraph.segments.push(create_text("one", None, None, None));
        paragraph.segments.push(create_selection_marker(None));
        item.blocks.push(paragraph.into());
        let mut target = source_of(vec![BlockGroup::ListItem(item).into()]);

        let mut pasted = create_list_item(&[create_list_level(ListType::Unordered, None, None)], None);
        pasted.blocks.push(text_paragraph("two").into());

        let point = merge_model(
            &mut target,
            source_of(vec![BlockGroup::ListItem(pasted).into()]),
            None,
            &MergeModelOptions::new(),
        )
        .unwrap();

        let items: Vec<&ListItem> = target
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::BlockGroup(BlockGroup::ListItem(item)) => Some(item),
                _ => None,
            })
            .collect();
        assert_eq!(target.blocks.len(), 3);
        assert_eq!(items.len(), 3);
        assert_eq!(paragraph_texts(items[0]), vec!["one"]);
        assert_eq!(paragraph_texts(items[1]), vec!["two"]);
        assert!(items.iter().all(|item| item.levels.len() == 1));
        assert!(items
            .iter()
            .all(|item| item.levels[0].list_type == ListType::Ordered));

        let tail = items[2].blocks[0].as_paragraph().unwrap();
        assert_eq!(tail.segments.len(), 2);
        assert!(tail.segments[0].is_marker());
        assert!(tail.segments[1].is_br());
        assert_eq!(point.path, GroupPath::root().child(PathStep::Block(2)));
    }

    fn text_cell(text: &str, format: Option<&BlockFormat>) -> TableCell {
        let mut cell = create_table_cell(false, false, false, format, None);
        cell.blocks.push(text_paragraph(text).into());
        cell
    }

    #[test]
    fn test_single_table_extends_grid_with_inherited_formats() {
        let left = BlockFormat {
            background_color: Some("green".into()),
            ..Default::default()
        };
        let mut table = create_table(0, None);
        let mut row = create_table_row(None, 30.0);
        row.cells.push(text_cell("a", None));
        row.cells.push(text_cell("b", Some(&left)));
        table.rows.push(row);
        table.widths = vec![100.0, 100.0];
        if let Some(Block::Paragraph(paragraph)) = table.rows[0].cells[1].blocks.first_mut() {
            paragraph.segments.push(create_selection_marker(None));
        }
        let mut target = source_of(vec![table.into()]);

        let mut pasted = create_table(0, None);
        for texts in [["1", "2"], ["3", "4"]] {
            let mut row = create_table_row(None, 30.0);
            row.cells = texts.iter().map(|t| text_cell(t, None)).collect();
            pasted.rows.push(row);
        }

        let options = MergeModelOptions::new().with_merge_table(true);
        let point = merge_model(&mut target, source_of(vec![pasted.into()]), None, &options).unwrap();

        let table = target.blocks[0].as_table().unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.widths.len(), 3);
        assert_eq!(paragraph_texts(table.cell(0, 1).unwrap()), vec!["1"]);
        assert_eq!(paragraph_texts(table.cell(1, 2).unwrap()), vec!["4"]);
        assert_eq!(table.cell(1, 0).unwrap().format.background_color, None);
        assert_eq!(
            table.cell(1, 1).unwrap().format.background_color,
            None,
            "pasted cell replaces the synthesized one"
        );
        assert_eq!(table.rows[1].cells.len(), 3);
        assert!(point.path.ends_in_table_cell());
        assert_eq!(point.table_context.map(|c| (c.row, c.col)), Some((0, 1)));
    }

    #[test]
    fn test_synthesized_cells_inherit_from_neighbor() {
        let green = BlockFormat {
            background_color: Some("green".into()),
            ..Default::default()
        };
        let mut table = create_table(0, None);
        let mut row = create_table_row(None, 30.0);
        row.cells.push(text_cell("a", None));
        table.rows.push(row);
        let mut row = create_table_row(None, 30.0);
        row.cells.push(text_cell("b", Some(&green)));
        table.rows.push(row);
        if let Some(Block::Paragraph(paragraph)) = table.rows[0].cells[0].blocks.first_mut() {
            paragraph.segments.push(create_selection_marker(None));
        }
        let mut target = source_of(vec![table.into()]);

        let mut pasted = create_table(0, None);
        let mut row = create_table_row(None, 30.0);
        row.cells = vec![text_cell("1", None), text_cell("2", None)];
        pasted.rows.push(row);

        let options = MergeModelOptions::new().with_merge_table(true);
        merge_model(&mut target, source_of(vec![pasted.into()]), None, &options);

        let table = target.blocks[0].as_table().unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(paragraph_texts(table.cell(0, 1).unwrap()), vec!["2"]);
        assert_eq!(
            table.cell(1, 1).unwrap().format.background_color.as_deref(),
            Some("green")
        );
    }

    #[test]
    fn test_table_without_merge_flag_inserted_as_block() {
        let mut target = caret_document("ab", "");
        let mut pasted = create_table(0, None);
        let mut row = create_table_row(None, 30.0);
        row.cells = vec![text_cell("1", None)];
        pasted.rows.push(row);

        merge_model(&mut target, source_of(vec![pasted.into()]), None, &MergeModelOptions::new());
        assert!(target.blocks.iter().any(|b| b.as_table().is_some()));
        assert_eq!(target.blocks[0].as_paragraph().unwrap().text(), "ab");
    }
}
