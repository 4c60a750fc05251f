//! Content model to DOM conversion.
//!
//! The exporter clears the target root and rebuilds it from the model.
//! While writing it records where selected content starts and ends, then
//! resolves those anchors into a [`DomSelection`]: a table cell selection
//! wins over an image selection, which wins over a text range.

mod block;
mod context;
mod list;
mod options;
mod position;
mod segment;
mod table;

pub use context::{Anchor, Inherited, ListStackEntry, ModelToDomContext, RegularSelection};
pub use options::ModelToDomOptions;
pub use position::calc_position;

pub(crate) use block::write_group_children;

use crate::dom::{Dom, DomPoint, DomRange, DomSelection, NodeId};
use crate::dom_to_model::DomIndexer;
use crate::model::Document;

/// Write `model` into `root`, replacing its children, and return the
/// selection the model carries.
pub fn content_model_to_dom(
    dom: &mut Dom,
    root: NodeId,
    model: &mut Document,
    options: &ModelToDomOptions,
) -> Option<DomSelection> {
    export(dom, root, model, options, None)
}

/// [`content_model_to_dom`], reporting every written text node and
/// paragraph to `indexer`.
pub fn content_model_to_dom_indexed(
    dom: &mut Dom,
    root: NodeId,
    model: &mut Document,
    options: &ModelToDomOptions,
    indexer: &mut dyn DomIndexer,
) -> Option<DomSelection> {
    export(dom, root, model, options, Some(indexer))
}

fn export<'a>(
    dom: &mut Dom,
    root: NodeId,
    model: &mut Document,
    options: &'a ModelToDomOptions,
    indexer: Option<&'a mut dyn DomIndexer>,
) -> Option<DomSelection> {
    log::debug!("exporting {} top-level blocks", model.blocks.len());

    let mut context = ModelToDomContext::new(options);
    context.indexer = indexer;
    dom.clear_children(root);

    write_group_children(dom, root, &mut model.blocks, &mut context, &Inherited::default());

    let selection = resolve_selection(dom, root, &context);
    log::debug!("export selection: {:?}", selection);
    selection
}

/// A caret right after an empty text node sits on the parent instead.
fn avoid_empty_text(dom: &Dom, point: DomPoint) -> DomPoint {
    if dom.is_text(point.node) && dom.node_length(point.node) == 0 {
        if let (Some(parent), Some(index)) = (dom.parent(point.node), dom.child_index(point.node)) {
            return DomPoint::new(parent, index);
        }
    }
    point
}

fn resolve_selection(
    dom: &mut Dom,
    root: NodeId,
    context: &ModelToDomContext<'_>,
) -> Option<DomSelection> {
    let selection = if let Some((table, coordinates)) = context.table_selection {
        Some(DomSelection::Table { table, coordinates })
    } else if let Some(image) = context.image_selection {
        Some(DomSelection::Image { image })
    } else {
        let regular = &context.regular_selection;
        match (regular.start, regular.end) {
            (Some(start), Some(end)) => {
                let start = calc_position(dom, &start);
                let end = calc_position(dom, &end);
                start.zip(end).map(|(start, end)| {
                    let start = avoid_empty_text(dom, start);
                    let end = avoid_empty_text(dom, end);
                    DomSelection::Range {
                        range: DomRange::new(start, end),
                        is_reverted: false,
                    }
                })
            }
            _ => None,
        }
    };

    if !context.options.normalize_text_nodes {
        return selection;
    }
    match selection {
        Some(DomSelection::Range { range, is_reverted }) => {
            let mut points = [range.start, range.end];
            dom.normalize_text(root, &mut points);
            Some(DomSelection::Range {
                range: DomRange::new(points[0], points[1]),
                is_reverted,
            })
        }
        other => {
            dom.normalize_text(root, &mut []);
            other
        }
    }
}
