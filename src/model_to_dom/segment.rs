//! Segment writers.

use super::block::write_group_children;
use super::context::{Anchor, Inherited, ModelToDomContext};
use crate::dom::{Dom, NodeId};
use crate::dom_to_model::ENTITY_CLASS;
use crate::format::{apply_code, apply_dataset, apply_link, apply_segment_style, differs_from};
use crate::model::{Code, Entity, Link, Segment, SegmentFormat, SegmentKind};

fn enclose(dom: &mut Dom, node: NodeId, tag: &str) -> NodeId {
    let wrapper = dom.create_element(tag);
    dom.append_child(wrapper, node);
    wrapper
}

/// The part of a format expressible as `span` style.
fn style_part(format: &SegmentFormat) -> SegmentFormat {
    SegmentFormat {
        underline: None,
        strikethrough: None,
        super_or_sub_script_sequence: None,
        ..format.clone()
    }
}

/// Wrap `inner` in the elements expressing the segment's format and
/// decorators, innermost first: scripts, strikethrough, underline, code,
/// link, then a styled `span`. Returns the outermost node.
fn wrap_segment(
    dom: &mut Dom,
    inner: NodeId,
    format: &SegmentFormat,
    link: Option<&Link>,
    code: Option<&Code>,
    inherited: &SegmentFormat,
) -> NodeId {
    let mut node = inner;

    if format.super_or_sub_script_sequence != inherited.super_or_sub_script_sequence {
        if let Some(sequence) = &format.super_or_sub_script_sequence {
            for script in sequence.split_whitespace().rev() {
                match script {
                    "super" => node = enclose(dom, node, "sup"),
                    "sub" => node = enclose(dom, node, "sub"),
                    _ => {}
                }
            }
        }
    }
    if format.strikethrough == Some(true) && inherited.strikethrough != Some(true) {
        node = enclose(dom, node, "s");
    }
    if format.underline == Some(true) && inherited.underline != Some(true) {
        node = enclose(dom, node, "u");
    }
    if let Some(code) = code {
        node = enclose(dom, node, "code");
        apply_code(dom, node, code);
    }
    if let Some(link) = link {
        node = enclose(dom, node, "a");
        apply_link(dom, node, link);
    }

    let own = style_part(format);
    if differs_from(&own, &style_part(inherited)) {
        let span = enclose(dom, node, "span");
        apply_segment_style(dom, span, &own, inherited);
        node = span;
    }
    node
}

/// Write an entity wrapper, restoring its class names when asked to.
pub(super) fn write_entity_wrapper(
    dom: &mut Dom,
    entity: &Entity,
    context: &ModelToDomContext<'_>,
) -> NodeId {
    let wrapper = dom.materialize(&entity.wrapper);
    if context.options.write_entity_classes && !dom.class_list(wrapper).contains(&ENTITY_CLASS) {
        let format = &entity.entity_format;
        let mut classes: Vec<String> = dom
            .class_list(wrapper)
            .into_iter()
            .map(str::to_string)
            .collect();
        classes.push(ENTITY_CLASS.to_string());
        if let Some(entity_type) = &format.entity_type {
            classes.push(format!("_EType_{}", entity_type));
        }
        if let Some(id) = &format.id {
            classes.push(format!("_EId_{}", id));
        }
        classes.push(format!("_EReadonly_{}", u8::from(format.is_readonly)));
        if format.is_undeletable {
            classes.push("_EUndeletable_1".to_string());
        }
        dom.set_attribute(wrapper, "class", classes.join(" "));
    }
    wrapper
}

/// Write one segment into `parent` and advance the current position.
pub(super) fn write_segment(
    dom: &mut Dom,
    parent: NodeId,
    segment: &mut Segment,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    let Segment {
        kind,
        format,
        link,
        code,
        ..
    } = segment;
    let wrap = |dom: &mut Dom, node: NodeId| {
        wrap_segment(dom, node, format, link.as_ref(), code.as_ref(), &inherited.segment)
    };
    let anchor_node = match kind {
        SegmentKind::SelectionMarker => return,
        SegmentKind::Text { text } => {
            let text_node = dom.create_text(text.clone());
            let outer = wrap(dom, text_node);
            dom.append_child(parent, outer);
            text_node
        }
        SegmentKind::Br => {
            let br = dom.create_element("br");
            let outer = wrap(dom, br);
            dom.append_child(parent, outer);
            br
        }
        SegmentKind::Image(image) => {
            let img = dom.create_element("img");
            dom.set_attribute(img, "src", image.src.clone());
            if let Some(alt) = &image.alt {
                dom.set_attribute(img, "alt", alt.clone());
            }
            if let Some(title) = &image.title {
                dom.set_attribute(img, "title", title.clone());
            }
            if let Some(width) = &image.width {
                dom.set_style(img, "width", width);
            }
            if let Some(height) = &image.height {
                dom.set_style(img, "height", height);
            }
            apply_dataset(dom, img, &image.dataset);
            if image.is_selected_as_image_selection {
                context.image_selection = Some(img);
            }
            let outer = wrap(dom, img);
            dom.append_child(parent, outer);
            img
        }
        SegmentKind::Entity(entity) => {
            let wrapper = write_entity_wrapper(dom, entity, context);
            dom.append_child(parent, wrapper);
            wrapper
        }
        SegmentKind::General(general) => {
            let element = dom.create_element(&general.element.tag_name);
            for (name, value) in &general.element.attributes {
                dom.set_attribute(element, name, value.clone());
            }
            let outer = wrap(dom, element);
            dom.append_child(parent, outer);

            let saved = context.regular_selection.current.take();
            let inner = Inherited {
                block: Default::default(),
                segment: format.clone(),
            };
            write_group_children(dom, element, &mut general.blocks, context, &inner);
            context.regular_selection.current = saved;
            element
        }
    };

    let block = context
        .regular_selection
        .current
        .map_or(parent, |current| current.block);
    context.regular_selection.current = Some(Anchor {
        block,
        segment: Some(anchor_node),
    });
}
