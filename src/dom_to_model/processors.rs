//! Node processors: one per kind of element the importer understands.

use super::builder::{
    add_block, add_decorators, add_segment, add_selection_marker, add_text_segment, close_block,
};
use super::context::DomToModelContext;
use super::list::{process_list, process_list_item};
use super::table::process_table;
use crate::dom::{Dom, DomPoint, NodeId, NodeKind};
use crate::format::{
    default_block_format, default_segment_format, is_block_tag, is_paragraph_decorator_tag,
    parse_block_format, parse_code, parse_dataset, parse_link, parse_segment_format, push_script,
};
use crate::model::creators::{
    create_br, create_divider, create_entity, create_entity_block, create_entity_segment,
    create_format_container, create_general_block, create_general_segment, create_paragraph,
    create_paragraph_decorator,
};
use crate::model::{
    is_white_space_preserved, BlockFormat, BlockGroup, BlockGroupContainer, ElementShell, Image,
    Segment, SegmentKind,
};

/// Class marking an entity wrapper.
pub const ENTITY_CLASS: &str = "_Entity";
const ENTITY_TYPE_PREFIX: &str = "_EType_";
const ENTITY_ID_PREFIX: &str = "_EId_";
const ENTITY_READONLY_PREFIX: &str = "_EReadonly_";
const ENTITY_UNDELETABLE_CLASS: &str = "_EUndeletable_1";

/// Inline tags that only contribute character format.
const FORMAT_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "u", "ins", "s", "strike", "del", "sup", "sub", "span", "font",
    "small", "big", "abbr", "cite", "mark", "q", "var", "kbd", "samp",
];

/// Elements whose content never reaches the model.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "head", "meta", "title", "link", "template", "noscript",
];

/// Process the children of `parent`, opening and closing the selection at
/// container positions between them.
pub fn process_child_nodes(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    parent: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let children = dom.children(parent);
    for (index, &child) in children.iter().enumerate() {
        handle_container_selection(group, context, DomPoint::new(parent, index));
        process_node(group, dom, child, context);
    }
    handle_container_selection(group, context, DomPoint::new(parent, children.len()));
}

/// Open or close the selection at a container position.
pub(super) fn handle_container_selection(
    group: &mut dyn BlockGroupContainer,
    context: &mut DomToModelContext<'_>,
    point: DomPoint,
) {
    let Some(range) = context.range() else {
        return;
    };
    if range.start == point {
        context.is_in_selection = true;
        add_selection_marker(group, context, point);
    }
    if range.end == point {
        if !range.is_collapsed() {
            add_selection_marker(group, context, point);
        }
        context.is_in_selection = false;
    }
}

/// Process one node of any kind.
pub fn process_node(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    match dom.kind(node) {
        NodeKind::Text(_) => process_text(group, dom, node, context),
        NodeKind::Element(_) => process_element(group, dom, node, context),
        NodeKind::Fragment => process_child_nodes(group, dom, node, context),
    }
}

/// Split a text node at the selection boundaries it contains.
fn process_text(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let raw = dom.text(node).unwrap_or_default();
    let chars: Vec<char> = if is_white_space_preserved(context.block_format.white_space.as_deref())
    {
        raw.chars().collect()
    } else {
        raw.chars()
            .map(|c| if matches!(c, '\r' | '\n' | '\t') { ' ' } else { c })
            .collect()
    };
    let slice = |from: usize, to: usize| -> String { chars[from..to].iter().collect() };

    let mut start = 0;
    if let Some(range) = context.range() {
        if range.start.node == node {
            let offset = range.start.offset.min(chars.len());
            add_text_segment(group, &slice(0, offset), node, context);
            context.is_in_selection = true;
            add_selection_marker(group, context, range.start);
            start = offset;
        }
        if range.end.node == node {
            let offset = range.end.offset.clamp(start, chars.len());
            if !range.is_collapsed() {
                add_text_segment(group, &slice(start, offset), node, context);
                add_selection_marker(group, context, range.end);
            }
            context.is_in_selection = false;
            start = offset;
        }
    }
    add_text_segment(group, &slice(start, chars.len()), node, context);
}

/// Dispatch an element to its processor.
pub fn process_element(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let Some(tag) = dom.tag_name(node) else {
        return;
    };

    let processor = context.options.processor_overrides.get(tag).copied();
    if let Some(processor) = processor {
        processor(group, dom, node, context);
        return;
    }

    if dom.class_list(node).contains(&ENTITY_CLASS) {
        process_entity(group, dom, node, context);
        return;
    }

    match tag {
        _ if SKIPPED_TAGS.contains(&tag) => {}
        "br" => process_br(group, context),
        "img" => process_image(group, dom, node, context),
        "hr" => process_divider(group, dom, node, context),
        "table" => process_table(group, dom, node, context),
        "ol" | "ul" => process_list(group, dom, node, context),
        "li" => process_list_item(group, dom, node, context),
        "a" => process_link(group, dom, node, context),
        "code" => process_code(group, dom, node, context),
        "blockquote" | "pre" => process_format_container(group, dom, node, tag, context),
        "tbody" | "thead" | "tfoot" | "tr" | "td" | "th" => {
            process_child_nodes(group, dom, node, context)
        }
        _ if FORMAT_TAGS.contains(&tag) => {
            if dom.style(node, "display").as_deref() == Some("block") {
                process_block(group, dom, node, tag, context);
            } else {
                process_format(group, dom, node, tag, context);
            }
        }
        _ if is_block_tag(tag) => process_block(group, dom, node, tag, context),
        _ => process_general(group, dom, node, context),
    }
}

/// Parse character format from `node` onto the context, including any
/// configured extra parsers.
pub fn parse_segment_formats(dom: &Dom, node: NodeId, context: &mut DomToModelContext<'_>) {
    parse_segment_format(dom, node, &mut context.segment_format);
    for parser in &context.options.segment_format_parsers {
        parser(dom, node, &mut context.segment_format);
    }
}

/// Block format of `node`: inherited format, tag defaults, then inline
/// style and any configured extra parsers.
pub fn parse_block_formats(
    dom: &Dom,
    node: NodeId,
    tag: &str,
    context: &DomToModelContext<'_>,
) -> BlockFormat {
    let mut format = context.block_format.clone();
    if let Some(default) = default_block_format(tag) {
        format.overlay(&default);
    }
    parse_block_format(dom, node, &mut format);
    for parser in &context.options.block_format_parsers {
        parser(dom, node, &mut format);
    }
    format
}

fn has_block_children(dom: &Dom, node: NodeId) -> bool {
    dom.children(node).iter().any(|&child| {
        dom.tag_name(child)
            .is_some_and(|tag| is_block_tag(tag) || tag == "br")
            || dom.class_list(child).contains(&ENTITY_CLASS)
    })
}

/// A block element: a non-implicit paragraph, decorated for `p` and
/// headings.
fn process_block(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    tag: &str,
    context: &mut DomToModelContext<'_>,
) {
    context.stack_format(|context| {
        let format = parse_block_formats(dom, node, tag, context);
        let decorator = is_paragraph_decorator_tag(tag)
            .then(|| create_paragraph_decorator(tag, default_segment_format(tag).as_ref()));
        parse_segment_formats(dom, node, context);

        let mut paragraph = create_paragraph(false, Some(&format), None, decorator.as_ref());
        if context.options.allow_cache_element && !has_block_children(dom, node) {
            paragraph.cached_element = Some(node);
        }
        context.block_format = format.inheritable();

        let index = group.blocks().len();
        add_block(group, paragraph);
        process_child_nodes(group, dom, node, context);

        if let Some(indexer) = context.indexer.as_deref_mut() {
            if let Some(paragraph) = group.blocks().get(index).and_then(|b| b.as_paragraph()) {
                indexer.on_paragraph(node, paragraph);
            }
        }
    });
    close_block(group, &context.block_format);
}

/// `blockquote` and `pre`: a format container around the element's blocks.
fn process_format_container(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    tag: &str,
    context: &mut DomToModelContext<'_>,
) {
    context.stack_format(|context| {
        let format = parse_block_formats(dom, node, tag, context);
        if let Some(default) = default_segment_format(tag) {
            context.segment_format.overlay(&default);
        }
        parse_segment_formats(dom, node, context);

        let mut container = create_format_container(tag, Some(&format));
        context.block_format = format.inheritable();
        process_child_nodes(&mut container, dom, node, context);
        add_block(group, BlockGroup::FormatContainer(container));
    });
    close_block(group, &context.block_format);
}

/// Inline tags that only change character format.
fn process_format(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    tag: &str,
    context: &mut DomToModelContext<'_>,
) {
    context.stack_format(|context| {
        match tag {
            "sup" => push_script(&mut context.segment_format, "super"),
            "sub" => push_script(&mut context.segment_format, "sub"),
            _ => {
                if let Some(default) = default_segment_format(tag) {
                    context.segment_format.overlay(&default);
                }
            }
        }
        parse_segment_formats(dom, node, context);
        process_child_nodes(group, dom, node, context);
    });
}

fn process_link(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    context.stack_format(|context| {
        if let Some(link) = parse_link(dom, node) {
            context.link = Some(link);
        }
        parse_segment_formats(dom, node, context);
        process_child_nodes(group, dom, node, context);
    });
}

fn process_code(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    context.stack_format(|context| {
        context.code = Some(parse_code(dom, node));
        parse_segment_formats(dom, node, context);
        process_child_nodes(group, dom, node, context);
    });
}

fn process_br(group: &mut dyn BlockGroupContainer, context: &mut DomToModelContext<'_>) {
    let mut br = create_br(Some(&context.segment_format));
    br.is_selected = context.is_in_selection;
    add_decorators(&mut br, context);
    add_segment(group, br, &context.block_format);
}

fn process_image(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    context.stack_format(|context| {
        parse_segment_formats(dom, node, context);

        let attribute = |name: &str| dom.attribute(node, name).map(str::to_string);
        let is_image_selection = context.is_image_selected(node);
        let image = Image {
            src: attribute("src").unwrap_or_default(),
            alt: attribute("alt"),
            title: attribute("title"),
            width: dom.style(node, "width").or_else(|| attribute("width")),
            height: dom.style(node, "height").or_else(|| attribute("height")),
            is_selected_as_image_selection: is_image_selection,
            dataset: parse_dataset(dom, node),
        };

        let mut segment = Segment::new(SegmentKind::Image(image));
        segment.format = context.segment_format.clone();
        segment.is_selected = is_image_selection || context.is_in_selection;
        add_decorators(&mut segment, context);
        add_segment(group, segment, &context.block_format);
    });
}

fn process_divider(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let mut format = BlockFormat::default();
    parse_block_format(dom, node, &mut format);
    for parser in &context.options.block_format_parsers {
        parser(dom, node, &mut format);
    }

    let mut divider = create_divider("hr", Some(&format));
    divider.is_selected = context.is_in_selection;
    if context.options.allow_cache_element {
        divider.cached_element = Some(node);
    }
    add_block(group, divider);
    close_block(group, &context.block_format);
}

/// Whether an element lays out as a block.
fn is_block_element(dom: &Dom, node: NodeId) -> bool {
    match dom.style(node, "display").as_deref() {
        Some("block") | Some("flex") | Some("grid") | Some("table") => true,
        Some(_) => false,
        None => dom.tag_name(node).is_some_and(is_block_tag),
    }
}

/// An element carrying the entity class: captured whole, never descended
/// into.
fn process_entity(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let classes = dom.class_list(node);
    let find = |prefix: &str| {
        classes
            .iter()
            .find_map(|class| class.strip_prefix(prefix))
            .filter(|value| !value.is_empty())
    };
    let is_readonly = find(ENTITY_READONLY_PREFIX).map(|value| value == "1");
    let mut entity = create_entity(
        dom.snapshot(node),
        is_readonly,
        find(ENTITY_TYPE_PREFIX),
        find(ENTITY_ID_PREFIX),
    );
    entity.entity_format.is_undeletable = classes.contains(&ENTITY_UNDELETABLE_CLASS);

    if is_block_element(dom, node) {
        let mut block = create_entity_block(entity, Some(&context.segment_format));
        block.is_selected = context.is_in_selection;
        add_block(group, block);
        close_block(group, &context.block_format);
    } else {
        let mut segment = create_entity_segment(entity, Some(&context.segment_format));
        segment.is_selected = context.is_in_selection;
        add_decorators(&mut segment, context);
        add_segment(group, segment, &context.block_format);
    }
}

/// An element the model has no dedicated node for: kept as a General
/// block or segment whose children are still modeled.
fn process_general(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let Some(element) = dom.element(node) else {
        return;
    };
    let shell = ElementShell {
        tag_name: element.tag_name.clone(),
        attributes: element.attributes.clone(),
    };
    log::trace!("keeping unknown element <{}> as general content", shell.tag_name);

    if is_block_element(dom, node) {
        let mut block = create_general_block(shell);
        block.is_selected = context.is_in_selection;
        context.isolate_list(|context| {
            context.stack_format(|context| {
                process_child_nodes(&mut block, dom, node, context);
            })
        });
        add_block(group, BlockGroup::General(block));
        close_block(group, &context.block_format);
    } else {
        let mut segment = create_general_segment(shell, Some(&context.segment_format));
        segment.is_selected = context.is_in_selection;
        add_decorators(&mut segment, context);
        if let SegmentKind::General(general) = &mut segment.kind {
            context.isolate_list(|context| {
                context.stack_format(|context| {
                    context.block_format = BlockFormat::default();
                    process_child_nodes(general, dom, node, context);
                })
            });
        }
        add_segment(group, segment, &context.block_format);
    }
}
