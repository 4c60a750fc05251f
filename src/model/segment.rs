//! Inline segments living inside a paragraph.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::decorator::{Code, Link};
use super::foreign::{ElementShell, ForeignNode};
use super::format::{Dataset, EntityFormat, SegmentFormat};
use super::is_false;

/// One inline run of a paragraph.
///
/// The fields shared by every kind live here; kind-specific data lives in
/// [`SegmentKind`], flattened into the same JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(flatten)]
    pub kind: SegmentKind,
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
}

/// Kind-specific segment data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "segmentType")]
pub enum SegmentKind {
    Text { text: String },
    Br,
    Image(Image),
    General(GeneralSegment),
    Entity(Entity),
    /// Caret placeholder; its format is the pending format at the caret
    SelectionMarker,
}

/// Image attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected_as_image_selection: bool,
    #[serde(default, skip_serializing_if = "Dataset::is_empty")]
    pub dataset: Dataset,
}

/// An inline foreign element whose children are modeled as blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSegment {
    pub element: ElementShell,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Opaque content owned by an external collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub entity_format: EntityFormat,
    pub wrapper: ForeignNode,
}

impl Segment {
    /// Build a segment of the given kind with no format or decorators.
    pub fn new(kind: SegmentKind) -> Self {
        Self {
            kind,
            format: SegmentFormat::default(),
            is_selected: false,
            link: None,
            code: None,
        }
    }

    /// Short kind name, for logging and text dumps.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SegmentKind::Text { .. } => "Text",
            SegmentKind::Br => "Br",
            SegmentKind::Image(_) => "Image",
            SegmentKind::General(_) => "General",
            SegmentKind::Entity(_) => "Entity",
            SegmentKind::SelectionMarker => "SelectionMarker",
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self.kind, SegmentKind::SelectionMarker)
    }

    pub fn is_br(&self) -> bool {
        matches!(self.kind, SegmentKind::Br)
    }

    /// Text of a Text segment.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            SegmentKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Mutable text of a Text segment.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            SegmentKind::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Entity payload of an Entity segment.
    pub fn entity(&self) -> Option<&Entity> {
        match &self.kind {
            SegmentKind::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Whether this segment can share one Text run with `other`: same
    /// format, decorators and selection state.
    pub fn is_same_run(&self, other: &Segment) -> bool {
        self.format == other.format
            && self.link == other.link
            && self.code == other.code
            && self.is_selected == other.is_selected
    }
}
