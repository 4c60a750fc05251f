//! State threaded through the importer's recursive descent.

use super::options::DomToModelOptions;
use crate::dom::{DomPoint, DomRange, DomSelection, NodeId, TableSelectionCoordinates};
use crate::model::{BlockFormat, Code, Link, ListItem, ListLevel, Paragraph, SegmentFormat, Table};

/// Reverse index from source nodes to the model built from them.
///
/// Called while the model is being built, so indices are only meaningful
/// relative to the paragraph passed in.
pub trait DomIndexer {
    /// `segment_index` of `paragraph` holds (part of) the text of `node`.
    fn on_segment(&mut self, node: NodeId, paragraph: &Paragraph, segment_index: usize);

    /// A paragraph was built from `node`.
    fn on_paragraph(&mut self, _node: NodeId, _paragraph: &Paragraph) {}

    /// A table was built from `node`.
    fn on_table(&mut self, _node: NodeId, _table: &Table) {}
}

/// List state: the level stack at the current depth and the items built
/// so far that still have to be added to the list parent.
#[derive(Debug, Default)]
pub struct ListFormat {
    pub levels: Vec<ListLevel>,
    pub pending_items: Vec<ListItem>,
}

/// Format state saved by [`DomToModelContext::stack_format`].
#[derive(Debug, Clone)]
struct FormatScope {
    segment_format: SegmentFormat,
    block_format: BlockFormat,
    link: Option<Link>,
    code: Option<Code>,
}

/// Importer context.
pub struct DomToModelContext<'a> {
    /// Character format of the current position
    pub segment_format: SegmentFormat,

    /// Inheritable block format of the current position
    pub block_format: BlockFormat,

    pub link: Option<Link>,
    pub code: Option<Code>,

    /// Whether content being read lies inside the selection
    pub is_in_selection: bool,

    pub selection: Option<DomSelection>,
    pub list_format: ListFormat,
    pub options: &'a DomToModelOptions,
    pub indexer: Option<&'a mut dyn DomIndexer>,
}

impl<'a> DomToModelContext<'a> {
    /// Create a context for one import.
    pub fn new(options: &'a DomToModelOptions, selection: Option<DomSelection>) -> Self {
        Self {
            segment_format: SegmentFormat::default(),
            block_format: BlockFormat::default(),
            link: None,
            code: None,
            is_in_selection: false,
            selection,
            list_format: ListFormat::default(),
            options,
            indexer: None,
        }
    }

    /// Run `f` and restore the format state (segment and block format,
    /// link, code) afterwards.
    pub fn stack_format<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = FormatScope {
            segment_format: self.segment_format.clone(),
            block_format: self.block_format.clone(),
            link: self.link.clone(),
            code: self.code.clone(),
        };
        let result = f(self);
        self.segment_format = saved.segment_format;
        self.block_format = saved.block_format;
        self.link = saved.link;
        self.code = saved.code;
        result
    }

    /// Run `f` with an empty list state, as content of a table cell or a
    /// foreign element starts a new list parent.
    pub fn isolate_list<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::take(&mut self.list_format);
        let result = f(self);
        self.list_format = saved;
        result
    }

    /// The range selection, if any.
    pub fn range(&self) -> Option<DomRange> {
        match self.selection {
            Some(DomSelection::Range { range, .. }) => Some(range),
            _ => None,
        }
    }

    /// Cell coordinates when `table` is the selected table.
    pub fn table_selection(&self, table: NodeId) -> Option<TableSelectionCoordinates> {
        match self.selection {
            Some(DomSelection::Table {
                table: selected,
                coordinates,
            }) if selected == table => Some(coordinates),
            _ => None,
        }
    }

    /// Whether `image` is the selected image.
    pub fn is_image_selected(&self, image: NodeId) -> bool {
        matches!(self.selection, Some(DomSelection::Image { image: selected }) if selected == image)
    }

    /// Format pending at `point`, if the caret is there.
    pub fn pending_format_at(&self, point: DomPoint) -> Option<&SegmentFormat> {
        self.options
            .pending_format
            .as_ref()
            .filter(|pending| pending.point == point)
            .map(|pending| &pending.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_format_restores() {
        let options = DomToModelOptions::default();
        let mut context = DomToModelContext::new(&options, None);
        context.segment_format.italic = Some(true);

        let inner = context.stack_format(|context| {
            context.segment_format.font_weight = Some("bold".into());
            context.link = Some(Link::default());
            context.segment_format.is_bold()
        });

        assert!(inner);
        assert!(!context.segment_format.is_bold());
        assert_eq!(context.segment_format.italic, Some(true));
        assert!(context.link.is_none());
    }

    #[test]
    fn test_isolate_list() {
        let options = DomToModelOptions::default();
        let mut context = DomToModelContext::new(&options, None);
        context
            .list_format
            .levels
            .push(crate::model::creators::create_list_level(
                crate::model::ListType::Ordered,
                None,
                None,
            ));

        context.isolate_list(|context| assert!(context.list_format.levels.is_empty()));
        assert_eq!(context.list_format.levels.len(), 1);
    }
}
