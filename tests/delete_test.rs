//! Property tests for selection deletion around undeletable entities.

use content_model::delete_selection;
use content_model::model::creators::*;
use content_model::model::{Block, Document, ForeignNode, Segment};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Entity { undeletable: bool },
}

fn arb_piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        "[a-c]{1,3}".prop_map(Piece::Text),
        any::<bool>().prop_map(|undeletable| Piece::Entity { undeletable }),
    ]
}

fn arb_document() -> impl Strategy<Value = Vec<Vec<Piece>>> {
    prop::collection::vec(prop::collection::vec(arb_piece(), 1..5), 1..4)
}

fn entity_segment(id: usize, undeletable: bool) -> Segment {
    let id = id.to_string();
    let mut entity = create_entity(ForeignNode::element("span"), None, Some("tag"), Some(&id));
    entity.entity_format.is_undeletable = undeletable;
    create_entity_segment(entity, None)
}

/// Build the document with the pieces in `selected` (flat positions)
/// marked selected. Returns the model and, per entity in document order,
/// its id and whether it must survive.
fn build(
    spec: &[Vec<Piece>],
    selected: std::ops::RangeInclusive<usize>,
) -> (Document, Vec<(String, bool)>) {
    let mut document = create_document(None);
    let mut entities = Vec::new();
    let mut position = 0;
    for pieces in spec {
        let mut paragraph = create_paragraph(false, None, None, None);
        for piece in pieces {
            let is_selected = selected.contains(&position);
            let mut segment = match piece {
                Piece::Text(text) => create_text(text.as_str(), None, None, None),
                Piece::Entity { undeletable } => {
                    entities.push((entities.len().to_string(), !is_selected || *undeletable));
                    entity_segment(entities.len() - 1, *undeletable)
                }
            };
            segment.is_selected = is_selected;
            paragraph.segments.push(segment);
            position += 1;
        }
        document.blocks.push(paragraph.into());
    }
    (document, entities)
}

fn entity_ids(document: &Document) -> Vec<String> {
    document
        .blocks
        .iter()
        .filter_map(Block::as_paragraph)
        .flat_map(|paragraph| paragraph.segments.iter())
        .filter_map(|segment| segment.entity()?.entity_format.id.clone())
        .collect()
}

proptest! {
    #[test]
    fn prop_surviving_entities_keep_document_order(
        spec in arb_document(),
        start in any::<prop::sample::Index>(),
        length in any::<prop::sample::Index>(),
    ) {
        let total: usize = spec.iter().map(Vec::len).sum();
        let first = start.index(total);
        let last = first + length.index(total - first);
        let (mut document, entities) = build(&spec, first..=last);

        delete_selection(&mut document, &[], None);

        let expected: Vec<String> = entities
            .into_iter()
            .filter(|(_, survives)| *survives)
            .map(|(id, _)| id)
            .collect();
        prop_assert_eq!(entity_ids(&document), expected);

        let survivors_selected = document
            .blocks
            .iter()
            .filter_map(Block::as_paragraph)
            .flat_map(|paragraph| paragraph.segments.iter())
            .any(|segment| segment.entity().is_some() && segment.is_selected);
        prop_assert!(!survivors_selected);
    }
}
