//! Importer configuration.

use std::collections::BTreeMap;

use super::context::DomToModelContext;
use crate::dom::{Dom, DomPoint, NodeId};
use crate::model::{BlockFormat, BlockGroupContainer, SegmentFormat};

/// Replacement processor for one tag.
pub type ElementProcessor =
    fn(&mut dyn BlockGroupContainer, &Dom, NodeId, &mut DomToModelContext<'_>);

/// Extra parser run after the built-in segment format parsing.
pub type SegmentFormatParser = fn(&Dom, NodeId, &mut SegmentFormat);

/// Extra parser run after the built-in block format parsing.
pub type BlockFormatParser = fn(&Dom, NodeId, &mut BlockFormat);

/// A format to stamp onto the selection marker created at `point`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFormat {
    pub format: SegmentFormat,
    pub point: DomPoint,
}

/// Options for [`dom_to_content_model`](super::dom_to_content_model).
#[derive(Debug, Clone, Default)]
pub struct DomToModelOptions {
    /// Per-tag processor overrides, keyed by lowercase tag name
    pub processor_overrides: BTreeMap<String, ElementProcessor>,

    /// Additional segment format parsers
    pub segment_format_parsers: Vec<SegmentFormatParser>,

    /// Additional block format parsers
    pub block_format_parsers: Vec<BlockFormatParser>,

    /// Default segment format of the editor, stored on the document
    pub default_segment_format: SegmentFormat,

    /// Remember source nodes as cached render handles
    pub allow_cache_element: bool,

    /// Format waiting to be applied at the caret
    pub pending_format: Option<PendingFormat>,
}

impl DomToModelOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the processor for a tag.
    pub fn with_processor(mut self, tag_name: &str, processor: ElementProcessor) -> Self {
        self.processor_overrides
            .insert(tag_name.to_ascii_lowercase(), processor);
        self
    }

    /// Add a segment format parser.
    pub fn with_segment_format_parser(mut self, parser: SegmentFormatParser) -> Self {
        self.segment_format_parsers.push(parser);
        self
    }

    /// Add a block format parser.
    pub fn with_block_format_parser(mut self, parser: BlockFormatParser) -> Self {
        self.block_format_parsers.push(parser);
        self
    }

    /// Set the editor's default segment format.
    pub fn with_default_segment_format(mut self, format: SegmentFormat) -> Self {
        self.default_segment_format = format;
        self
    }

    /// Cache source nodes on paragraphs, tables and dividers.
    pub fn with_cache_element(mut self, allow: bool) -> Self {
        self.allow_cache_element = allow;
        self
    }

    /// Stamp `format` onto the marker created at `point`.
    pub fn with_pending_format(mut self, format: SegmentFormat, point: DomPoint) -> Self {
        self.pending_format = Some(PendingFormat { format, point });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(_: &mut dyn BlockGroupContainer, _: &Dom, _: NodeId, _: &mut DomToModelContext<'_>) {}

    fn bold_everything(_: &Dom, _: NodeId, format: &mut SegmentFormat) {
        format.font_weight = Some("bold".into());
    }

    #[test]
    fn test_builder() {
        let options = DomToModelOptions::new()
            .with_processor("VIDEO", skip)
            .with_segment_format_parser(bold_everything)
            .with_cache_element(true);

        assert!(options.processor_overrides.contains_key("video"));
        assert_eq!(options.segment_format_parsers.len(), 1);
        assert!(options.allow_cache_element);
        assert!(options.pending_format.is_none());
    }
}
