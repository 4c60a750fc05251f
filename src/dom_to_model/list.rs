//! List import.
//!
//! Items of nested lists are flattened into the group holding the
//! outermost list. Items are queued on the context while their list is
//! walked; an item goes in front of the items nested inside it, and the
//! outermost list drains the queue into its group after each child.

use super::builder::{add_block, close_block};
use super::context::DomToModelContext;
use super::processors::{
    handle_container_selection, parse_block_formats, parse_segment_formats, process_child_nodes,
    process_node,
};
use crate::dom::{Dom, DomPoint, NodeId};
use crate::format::{parse_dataset, parse_list_level_format};
use crate::model::creators::{create_list_item, create_list_level};
use crate::model::{BlockGroup, BlockGroupContainer, ListLevelFormat, ListType};

pub(super) fn process_list(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    let list_type = if dom.tag_name(node) == Some("ol") {
        ListType::Ordered
    } else {
        ListType::Unordered
    };
    let mut format = ListLevelFormat::default();
    parse_list_level_format(dom, node, &mut format);
    let mut level = create_list_level(list_type, Some(&format), Some(&parse_dataset(dom, node)));
    if context.options.allow_cache_element {
        level.cached_element = Some(node);
    }

    let is_outermost = context.list_format.levels.is_empty();
    context.list_format.levels.push(level);

    context.stack_format(|context| {
        parse_segment_formats(dom, node, context);
        if is_outermost {
            // Drain after every child so stray content between items keeps
            // its place.
            let children = dom.children(node);
            for (index, &child) in children.iter().enumerate() {
                handle_container_selection(group, context, DomPoint::new(node, index));
                process_node(group, dom, child, context);
                let items = std::mem::take(&mut context.list_format.pending_items);
                for item in items {
                    add_block(group, BlockGroup::ListItem(item));
                }
            }
            handle_container_selection(group, context, DomPoint::new(node, children.len()));
        } else {
            process_child_nodes(group, dom, node, context);
        }
    });

    context.list_format.levels.pop();
    if is_outermost {
        close_block(group, &context.block_format);
    }
}

pub(super) fn process_list_item(
    group: &mut dyn BlockGroupContainer,
    dom: &Dom,
    node: NodeId,
    context: &mut DomToModelContext<'_>,
) {
    if context.list_format.levels.is_empty() {
        // A stray li outside any list reads as a plain block.
        context.stack_format(|context| {
            let format = parse_block_formats(dom, node, "li", context);
            context.block_format = format.inheritable();
            process_child_nodes(group, dom, node, context);
        });
        close_block(group, &context.block_format);
        return;
    }

    let queue_position = context.list_format.pending_items.len();
    let item = context.stack_format(|context| {
        parse_segment_formats(dom, node, context);
        let mut item = create_list_item(
            &context.list_format.levels,
            Some(&context.segment_format),
        );
        item.format_holder.is_selected = context.is_in_selection;
        item.format = parse_block_formats(dom, node, "li", context);
        if context.options.allow_cache_element {
            item.cached_element = Some(node);
        }
        context.block_format = item.format.inheritable();
        process_child_nodes(&mut item, dom, node, context);
        item
    });
    context
        .list_format
        .pending_items
        .insert(queue_position, item);
}
