//! Decorators: formatting that wraps content without being a block group.

use serde::{Deserialize, Serialize};

use super::format::{CodeFormat, Dataset, LinkFormat, SegmentFormat};

/// An explicit paragraph wrapper tag such as `p` or `h1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphDecorator {
    /// Lowercase tag name
    pub tag_name: String,
    /// Format the tag implies for its text
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
}

impl ParagraphDecorator {
    /// Heading level 1-6 when this decorator is a heading tag.
    pub fn heading_level(&self) -> Option<u8> {
        let level = self.tag_name.strip_prefix('h')?.parse::<u8>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }
}

/// Hyperlink decorator on a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub format: LinkFormat,
    #[serde(default, skip_serializing_if = "Dataset::is_empty")]
    pub dataset: Dataset,
}

/// Inline code decorator on a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Code {
    #[serde(default)]
    pub format: CodeFormat,
}
