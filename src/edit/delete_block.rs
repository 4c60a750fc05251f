//! Deleting a whole block from its group.

use super::delete_segment::{entity_operation, DeleteDirection};
use super::format_context::{DeletedEntity, FormatContext};
use crate::model::{Block, BlockGroup};

/// Delete `blocks[index]`, putting `replacement` in its place when the
/// block kind accepts one.
///
/// Tables and dividers are always deleted. Entities follow the entity
/// rule: deleted when selected or when a direction is given. General
/// blocks are only replaced, never removed. List items and format
/// containers are removed and ignore `replacement`. Returns whether the
/// block was deleted.
pub fn delete_block(
    blocks: &mut Vec<Block>,
    index: usize,
    replacement: Option<Block>,
    context: Option<&mut FormatContext>,
    direction: Option<DeleteDirection>,
) -> bool {
    let Some(block) = blocks.get(index) else {
        return false;
    };

    let replace_or_remove = |blocks: &mut Vec<Block>, replacement: Option<Block>| match replacement {
        Some(replacement) => blocks[index] = replacement,
        None => {
            blocks.remove(index);
        }
    };

    match block {
        Block::Table(_) | Block::Divider(_) => {
            replace_or_remove(blocks, replacement);
            true
        }
        Block::Entity(entity) => {
            let Some(operation) = entity_operation(entity.is_selected, direction) else {
                return false;
            };
            if let Some(context) = context {
                context.deleted_entities.push(DeletedEntity {
                    entity: entity.entity.clone(),
                    operation,
                });
            }
            replace_or_remove(blocks, replacement);
            true
        }
        Block::BlockGroup(BlockGroup::General(_)) => match replacement {
            Some(replacement) => {
                blocks[index] = replacement;
                true
            }
            None => false,
        },
        Block::BlockGroup(BlockGroup::ListItem(_) | BlockGroup::FormatContainer(_)) => {
            blocks.remove(index);
            true
        }
        Block::Paragraph(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::EntityOperation;
    use crate::model::creators::*;
    use crate::model::{ElementShell, ForeignNode};

    fn marker_paragraph() -> Block {
        let mut paragraph = create_paragraph(false, None, None, None);
        paragraph.segments.push(create_selection_marker(None));
        paragraph.into()
    }

    #[test]
    fn test_divider_replaced_or_removed() {
        let mut blocks: Vec<Block> = vec![create_divider("hr", None).into()];
        assert!(delete_block(&mut blocks, 0, Some(marker_paragraph()), None, None));
        assert!(blocks[0].as_paragraph().is_some());

        let mut blocks: Vec<Block> = vec![create_table(1, None).into()];
        assert!(delete_block(&mut blocks, 0, None, None, None));
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_entity_block_rule() {
        let entity = create_entity(ForeignNode::element("div"), None, Some("card"), None);
        let mut blocks: Vec<Block> = vec![create_entity_block(entity, None).into()];
        let mut context = FormatContext::new();

        assert!(!delete_block(&mut blocks, 0, None, Some(&mut context), None));
        assert_eq!(blocks.len(), 1);

        assert!(delete_block(
            &mut blocks,
            0,
            None,
            Some(&mut context),
            Some(DeleteDirection::Forward)
        ));
        assert!(blocks.is_empty());
        assert_eq!(context.deleted_entities[0].operation, EntityOperation::RemoveFromStart);
    }

    #[test]
    fn test_general_block_needs_replacement() {
        let general = create_general_block(ElementShell::new("section"));
        let mut blocks: Vec<Block> = vec![BlockGroup::General(general).into()];
        assert!(!delete_block(&mut blocks, 0, None, None, None));
        assert_eq!(blocks.len(), 1);
        assert!(delete_block(&mut blocks, 0, Some(marker_paragraph()), None, None));
        assert!(blocks[0].as_paragraph().is_some());
    }

    #[test]
    fn test_list_item_removed_ignoring_replacement() {
        let item = create_list_item(&[], None);
        let mut blocks: Vec<Block> = vec![BlockGroup::ListItem(item).into()];
        assert!(delete_block(&mut blocks, 0, Some(marker_paragraph()), None, None));
        assert!(blocks.is_empty());
    }
}
