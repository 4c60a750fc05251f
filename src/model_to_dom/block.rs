//! Block and block group writers.

use super::context::{Anchor, Inherited, ModelToDomContext};
use super::list::write_list_item;
use super::segment::{write_entity_wrapper, write_segment};
use super::table::write_table;
use crate::dom::{Dom, NodeId};
use crate::format::{apply_block_format, apply_segment_style, default_segment_format};
use crate::model::{
    Block, BlockGroup, Divider, EntityBlock, FormatContainer, GeneralBlock, Paragraph, SegmentKind,
};

/// A cached node that can be moved under `parent` as is.
pub(super) fn reusable_cache(
    dom: &Dom,
    cached: Option<NodeId>,
    parent: NodeId,
    context: &ModelToDomContext<'_>,
) -> Option<NodeId> {
    if !context.options.allow_cache_element {
        return None;
    }
    let node = cached?;
    (dom.is_valid(node) && dom.is_element(node) && !dom.contains(node, parent)).then_some(node)
}

/// Write every block of a group. List nodes are only shared between
/// consecutive list items of the same group.
pub(crate) fn write_group_children(
    dom: &mut Dom,
    parent: NodeId,
    blocks: &mut [Block],
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    let saved = std::mem::take(&mut context.list_stack);
    for block in blocks.iter_mut() {
        if !matches!(block, Block::BlockGroup(BlockGroup::ListItem(_))) {
            context.list_stack.clear();
        }
        write_block(dom, parent, block, context, inherited);
    }
    context.list_stack = saved;
}

fn write_block(
    dom: &mut Dom,
    parent: NodeId,
    block: &mut Block,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    match block {
        Block::Paragraph(paragraph) => write_paragraph(dom, parent, paragraph, context, inherited),
        Block::Table(table) => write_table(dom, parent, table, context, inherited),
        Block::Divider(divider) => write_divider(dom, parent, divider, context, inherited),
        Block::Entity(entity) => write_entity_block(dom, parent, entity, context),
        Block::BlockGroup(BlockGroup::ListItem(item)) => {
            write_list_item(dom, parent, item, context, inherited)
        }
        Block::BlockGroup(BlockGroup::FormatContainer(container)) => {
            write_format_container(dom, parent, container, context, inherited)
        }
        Block::BlockGroup(BlockGroup::General(general)) => {
            write_general_block(dom, parent, general, context, inherited)
        }
    }
}

fn move_after(context: &mut ModelToDomContext<'_>, parent: NodeId, node: NodeId) {
    context.regular_selection.current = Some(Anchor {
        block: parent,
        segment: Some(node),
    });
}

/// Write a paragraph. Implicit paragraphs with nothing of their own to
/// express are written straight into `parent`.
pub(super) fn write_paragraph(
    dom: &mut Dom,
    parent: NodeId,
    paragraph: &mut Paragraph,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    if !paragraph.has_selection() {
        if let Some(node) = reusable_cache(dom, paragraph.cached_element, parent, context) {
            dom.append_child(parent, node);
            move_after(context, parent, node);
            return;
        }
    }

    let mut block_format = inherited.block.clone();
    block_format.overlay(&paragraph.format);
    let needs_wrapper =
        !paragraph.is_implicit || paragraph.decorator.is_some() || block_format != inherited.block;

    let mut segment_format = inherited.segment.clone();
    let container = if needs_wrapper {
        let tag = paragraph
            .decorator
            .as_ref()
            .map_or(context.options.paragraph_tag.as_str(), |d| d.tag_name.as_str());
        let element = dom.create_element(tag);
        apply_block_format(dom, element, &paragraph.format, &inherited.block);
        if let Some(decorator) = &paragraph.decorator {
            segment_format.overlay(&decorator.format);
        }
        apply_segment_style(dom, element, &paragraph.segment_format, &segment_format);
        segment_format.overlay(&paragraph.segment_format);

        dom.append_child(parent, element);
        context.regular_selection.current = Some(Anchor {
            block: element,
            segment: None,
        });
        element
    } else {
        context.regular_selection.current = Some(Anchor {
            block: parent,
            segment: dom.last_child(parent),
        });
        parent
    };

    let inner = Inherited {
        block: block_format.inheritable(),
        segment: segment_format,
    };
    let mut text_nodes = Vec::new();
    for (index, segment) in paragraph.segments.iter_mut().enumerate() {
        if segment.is_selected {
            context.open_selection();
        }
        write_segment(dom, container, segment, context, &inner);
        if segment.is_selected {
            context.close_selection();
        }
        if matches!(segment.kind, SegmentKind::Text { .. }) {
            if let Some(node) = context.regular_selection.current.and_then(|c| c.segment) {
                text_nodes.push((node, index));
            }
        }
    }

    if needs_wrapper && context.options.allow_cache_element {
        paragraph.cached_element = Some(container);
    }
    if let Some(indexer) = context.indexer.as_deref_mut() {
        for (node, index) in text_nodes {
            indexer.on_segment(node, paragraph, index);
        }
        indexer.on_paragraph(container, paragraph);
    }
    if needs_wrapper {
        move_after(context, parent, container);
    }
}

fn write_divider(
    dom: &mut Dom,
    parent: NodeId,
    divider: &mut Divider,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    if !divider.is_selected {
        if let Some(node) = reusable_cache(dom, divider.cached_element, parent, context) {
            dom.append_child(parent, node);
            move_after(context, parent, node);
            return;
        }
    }

    let previous = dom.last_child(parent);
    let tag = if divider.tag_name.is_empty() {
        "hr"
    } else {
        divider.tag_name.as_str()
    };
    let element = dom.create_element(tag);
    apply_block_format(dom, element, &divider.format, &inherited.block);
    dom.append_child(parent, element);

    if divider.is_selected {
        context.select_node(parent, previous, element);
    }
    if context.options.allow_cache_element {
        divider.cached_element = Some(element);
    }
    move_after(context, parent, element);
}

fn write_entity_block(
    dom: &mut Dom,
    parent: NodeId,
    entity: &EntityBlock,
    context: &mut ModelToDomContext<'_>,
) {
    let previous = dom.last_child(parent);
    let wrapper = write_entity_wrapper(dom, &entity.entity, context);
    dom.append_child(parent, wrapper);
    if entity.is_selected {
        context.select_node(parent, previous, wrapper);
    }
    move_after(context, parent, wrapper);
}

fn write_format_container(
    dom: &mut Dom,
    parent: NodeId,
    container: &mut FormatContainer,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    let element = dom.create_element(&container.tag_name);
    apply_block_format(dom, element, &container.format, &inherited.block);
    dom.append_child(parent, element);

    let mut inner = inherited.clone();
    inner.block.overlay(&container.format);
    inner.block = inner.block.inheritable();
    if let Some(format) = default_segment_format(&container.tag_name) {
        inner.segment.overlay(&format);
    }
    write_group_children(dom, element, &mut container.blocks, context, &inner);

    if context.options.allow_cache_element {
        container.cached_element = Some(element);
    }
    move_after(context, parent, element);
}

fn write_general_block(
    dom: &mut Dom,
    parent: NodeId,
    general: &mut GeneralBlock,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    let previous = dom.last_child(parent);
    let element = dom.create_element(&general.element.tag_name);
    for (name, value) in &general.element.attributes {
        dom.set_attribute(element, name, value.clone());
    }
    dom.append_child(parent, element);

    write_group_children(dom, element, &mut general.blocks, context, inherited);
    if general.is_selected {
        context.select_node(parent, previous, element);
    }
    if context.options.allow_cache_element {
        general.cached_element = Some(element);
    }
    move_after(context, parent, element);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::*;
    use crate::model::{BlockFormat, SegmentFormat};
    use crate::model_to_dom::ModelToDomOptions;

    fn render(blocks: &mut [Block], options: &ModelToDomOptions) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let mut context = ModelToDomContext::new(options);
        write_group_children(&mut dom, root, blocks, &mut context, &Inherited::default());
        (dom, root)
    }

    #[test]
    fn test_implicit_paragraph_unwrapped() {
        let mut paragraph = create_paragraph(true, None, None, None);
        paragraph.segments.push(create_text("a", None, None, None));
        let mut blocks = vec![paragraph.into()];
        let (dom, root) = render(&mut blocks, &ModelToDomOptions::default());
        assert_eq!(dom.inner_html(root), "a");
    }

    #[test]
    fn test_decorated_paragraph() {
        let decorator = create_paragraph_decorator("h1", crate::format::heading_format(1).as_ref());
        let mut paragraph = create_paragraph(false, None, None, Some(&decorator));
        let bold = SegmentFormat {
            font_weight: Some("bold".into()),
            ..Default::default()
        };
        paragraph.segments.push(create_text("T", Some(&bold), None, None));
        let mut blocks = vec![paragraph.into()];
        let (dom, root) = render(&mut blocks, &ModelToDomOptions::default());
        assert_eq!(dom.inner_html(root), "<h1>T</h1>");
    }

    #[test]
    fn test_format_container_and_divider() {
        let format = BlockFormat {
            margin_left: Some("40px".into()),
            ..Default::default()
        };
        let mut quote = create_format_container("blockquote", Some(&format));
        let mut inner = create_paragraph(true, None, None, None);
        inner.segments.push(create_text("q", None, None, None));
        quote.blocks.push(inner.into());

        let mut blocks = vec![
            BlockGroup::FormatContainer(quote).into(),
            create_divider("hr", None).into(),
        ];
        let (dom, root) = render(&mut blocks, &ModelToDomOptions::default());
        assert_eq!(
            dom.inner_html(root),
            "<blockquote style=\"margin-left: 40px\">q</blockquote><hr>"
        );
    }

    #[test]
    fn test_cache_written_and_reused() {
        let options = ModelToDomOptions::default().with_cache_element(true);
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_text("a", None, None, None));
        let mut blocks: Vec<Block> = vec![paragraph.into()];

        let (mut dom, root) = render(&mut blocks, &options);
        let cached = blocks[0].as_paragraph().unwrap().cached_element.unwrap();
        assert_eq!(dom.children(root), &[cached]);

        let other = dom.create_element("div");
        let mut context = ModelToDomContext::new(&options);
        write_group_children(&mut dom, other, &mut blocks, &mut context, &Inherited::default());
        assert_eq!(dom.children(other), &[cached]);
    }
}
