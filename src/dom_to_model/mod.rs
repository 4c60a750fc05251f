//! DOM to content model conversion.
//!
//! A recursive descent over the DOM that threads a [`DomToModelContext`]
//! holding the format in effect, link/code decorators, list state and
//! whether the walk is inside the selection. Every element is routed to a
//! processor by tag; callers can replace processors per tag through
//! [`DomToModelOptions`].
//!
//! # Example
//!
//! ```
//! use content_model::dom::{parse_fragment, Dom};
//! use content_model::dom_to_model::{dom_to_content_model, DomToModelOptions};
//!
//! let mut dom = Dom::new();
//! let root = dom.create_element("div");
//! parse_fragment(&mut dom, root, "<p>Hello <b>world</b></p>").unwrap();
//!
//! let model = dom_to_content_model(&dom, root, &DomToModelOptions::default(), None);
//! assert_eq!(model.blocks.len(), 1);
//! ```

mod builder;
mod context;
mod list;
mod options;
mod processors;
mod table;

pub use context::{DomIndexer, DomToModelContext, ListFormat};
pub use options::{
    BlockFormatParser, DomToModelOptions, ElementProcessor, PendingFormat, SegmentFormatParser,
};
pub use processors::{
    parse_block_formats, parse_segment_formats, process_child_nodes, process_element,
    process_node, ENTITY_CLASS,
};

use crate::dom::{Dom, DomSelection, NodeId};
use crate::model::creators::create_document;
use crate::model::Document;
use crate::normalize::normalize_document;

/// Build a normalized content model from the children of `root`.
pub fn dom_to_content_model(
    dom: &Dom,
    root: NodeId,
    options: &DomToModelOptions,
    selection: Option<&DomSelection>,
) -> Document {
    import(dom, root, options, selection, None)
}

/// [`dom_to_content_model`], reporting the source node of every text
/// segment, paragraph and table to `indexer`.
pub fn dom_to_content_model_indexed(
    dom: &Dom,
    root: NodeId,
    options: &DomToModelOptions,
    selection: Option<&DomSelection>,
    indexer: &mut dyn DomIndexer,
) -> Document {
    import(dom, root, options, selection, Some(indexer))
}

fn import<'a>(
    dom: &Dom,
    root: NodeId,
    options: &'a DomToModelOptions,
    selection: Option<&DomSelection>,
    indexer: Option<&'a mut dyn DomIndexer>,
) -> Document {
    log::debug!(
        "importing DOM ({} nodes, selection: {})",
        dom.len(),
        selection.is_some()
    );

    let mut document = create_document(Some(&options.default_segment_format));
    let mut context = DomToModelContext::new(options, selection.copied());
    context.indexer = indexer;
    process_child_nodes(&mut document, dom, root, &mut context);
    normalize_document(&mut document);

    log::debug!("imported {} top-level blocks", document.blocks.len());
    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_fragment, DomPoint, DomRange};
    use crate::model::{Block, Paragraph, SegmentFormat, SegmentKind};

    fn parse(html: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        parse_fragment(&mut dom, root, html).unwrap();
        (dom, root)
    }

    fn first_paragraph(document: &Document) -> &Paragraph {
        document.blocks[0].as_paragraph().unwrap()
    }

    #[test]
    fn test_collapsed_selection_in_text() {
        let (dom, root) = parse("<div>abc</div>");
        let text = dom.children(dom.children(root)[0])[0];
        let selection = DomSelection::Range {
            range: DomRange::collapsed(DomPoint::new(text, 1)),
            is_reverted: false,
        };

        let document = dom_to_content_model(&dom, root, &DomToModelOptions::default(), Some(&selection));
        let kinds: Vec<&str> = first_paragraph(&document)
            .segments
            .iter()
            .map(|s| s.kind_name())
            .collect();
        assert_eq!(kinds, vec!["Text", "SelectionMarker", "Text"]);
        assert!(!first_paragraph(&document).segments[2].is_selected);
    }

    #[test]
    fn test_range_selection_splits_text() {
        let (dom, root) = parse("abcdef");
        let text = dom.children(root)[0];
        let selection = DomSelection::Range {
            range: DomRange::new(DomPoint::new(text, 1), DomPoint::new(text, 4)),
            is_reverted: false,
        };

        let document = dom_to_content_model(&dom, root, &DomToModelOptions::default(), Some(&selection));
        let paragraph = first_paragraph(&document);
        let parts: Vec<(&str, bool)> = paragraph
            .segments
            .iter()
            .map(|s| (s.text().unwrap_or(""), s.is_selected))
            .collect();
        assert_eq!(parts, vec![("a", false), ("bcd", true), ("ef", false)]);
    }

    #[test]
    fn test_pending_format_stamped_on_marker() {
        let (dom, root) = parse("ab");
        let text = dom.children(root)[0];
        let point = DomPoint::new(text, 2);
        let pending = SegmentFormat {
            font_weight: Some("bold".into()),
            ..Default::default()
        };
        let options = DomToModelOptions::default().with_pending_format(pending, point);
        let selection = DomSelection::Range {
            range: DomRange::collapsed(point),
            is_reverted: false,
        };

        let document = dom_to_content_model(&dom, root, &options, Some(&selection));
        let paragraph = first_paragraph(&document);
        let marker = &paragraph.segments[paragraph.marker_index().unwrap()];
        assert!(marker.format.is_bold());
    }

    #[test]
    fn test_image_selection() {
        let (dom, root) = parse(r#"a<img src="x.png" alt="x">"#);
        let image = dom.children(root)[1];
        let selection = DomSelection::Image { image };

        let document = dom_to_content_model(&dom, root, &DomToModelOptions::default(), Some(&selection));
        let segment = &first_paragraph(&document).segments[1];
        let SegmentKind::Image(image) = &segment.kind else {
            panic!("expected an image");
        };
        assert!(segment.is_selected);
        assert!(image.is_selected_as_image_selection);
        assert_eq!(image.alt.as_deref(), Some("x"));
    }

    #[test]
    fn test_cache_elements() {
        let (dom, root) = parse("<div>a</div><hr>");
        let options = DomToModelOptions::default().with_cache_element(true);
        let document = dom_to_content_model(&dom, root, &options, None);
        assert_eq!(
            first_paragraph(&document).cached_element,
            Some(dom.children(root)[0])
        );
        let Block::Divider(divider) = &document.blocks[1] else {
            panic!("expected a divider");
        };
        assert_eq!(divider.cached_element, Some(dom.children(root)[1]));
    }

    struct Recorder(Vec<(NodeId, String)>);

    impl DomIndexer for Recorder {
        fn on_segment(&mut self, node: NodeId, paragraph: &Paragraph, segment_index: usize) {
            let text = paragraph.segments[segment_index].text().unwrap_or("").to_string();
            self.0.push((node, text));
        }
    }

    #[test]
    fn test_indexer_sees_text_nodes() {
        let (dom, root) = parse("a<b>b</b>");
        let mut recorder = Recorder(Vec::new());
        dom_to_content_model_indexed(&dom, root, &DomToModelOptions::default(), None, &mut recorder);
        assert_eq!(recorder.0.len(), 2);
        assert_eq!(recorder.0[0], (dom.children(root)[0], "a".to_string()));
    }

    #[test]
    fn test_processor_override() {
        fn drop_element(
            _: &mut dyn crate::model::BlockGroupContainer,
            _: &Dom,
            _: NodeId,
            _: &mut DomToModelContext<'_>,
        ) {
        }

        let (dom, root) = parse("a<video></video>b");
        let options = DomToModelOptions::default().with_processor("video", drop_element);
        let document = dom_to_content_model(&dom, root, &options, None);
        assert_eq!(first_paragraph(&document).text(), "ab");
    }
}
