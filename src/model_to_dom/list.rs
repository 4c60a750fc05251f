//! List item writer.

use super::block::write_group_children;
use super::context::{Anchor, Inherited, ListStackEntry, ModelToDomContext};
use crate::dom::{Dom, NodeId};
use crate::format::{apply_block_format, apply_dataset, apply_list_level_format, apply_segment_style};
use crate::model::{ListItem, ListLevel};

/// Whether an open list element can hold an item at this level.
fn can_reuse(open: &ListLevel, level: &ListLevel) -> bool {
    open.list_type == level.list_type
        && open.format == level.format
        && open.dataset == level.dataset
        && level.format.start_number_override.is_none()
}

pub(super) fn write_list_item(
    dom: &mut Dom,
    parent: NodeId,
    item: &mut ListItem,
    context: &mut ModelToDomContext<'_>,
    inherited: &Inherited,
) {
    let mut depth = 0;
    while depth < item.levels.len()
        && depth < context.list_stack.len()
        && can_reuse(&context.list_stack[depth].level, &item.levels[depth])
    {
        depth += 1;
    }
    context.list_stack.truncate(depth);

    for level in &item.levels[depth..] {
        let list = dom.create_element(level.list_type.tag_name());
        apply_list_level_format(dom, list, &level.format);
        apply_dataset(dom, list, &level.dataset);
        let container = context.list_stack.last().map_or(parent, |entry| entry.node);
        dom.append_child(container, list);
        context.list_stack.push(ListStackEntry {
            node: list,
            level: ListLevel {
                cached_element: None,
                ..level.clone()
            },
        });
    }

    let container = context.list_stack.last().map_or(parent, |entry| entry.node);
    let li = dom.create_element("li");
    apply_block_format(dom, li, &item.format, &inherited.block);
    apply_segment_style(dom, li, &item.format_holder.format, &inherited.segment);
    dom.append_child(container, li);

    let mut inner = inherited.clone();
    inner.block.overlay(&item.format);
    inner.block = inner.block.inheritable();
    inner.segment.overlay(&item.format_holder.format);
    write_group_children(dom, li, &mut item.blocks, context, &inner);

    if context.options.allow_cache_element {
        item.cached_element = Some(li);
    }
    let outermost = context.list_stack.first().map_or(li, |entry| entry.node);
    context.regular_selection.current = Some(Anchor {
        block: parent,
        segment: Some(outermost),
    });
}
