//! Block groups: containers whose children are blocks.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::foreign::ElementShell;
use super::format::{BlockFormat, Dataset, ListLevelFormat, SegmentFormat};
use super::is_false;
use super::segment::{GeneralSegment, Segment, SegmentKind};
use super::table::TableCell;
use crate::dom::NodeId;

/// The root of a content model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockGroupType", rename = "Document", rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Default segment format of the editor
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
}

/// A block group that can appear as a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockGroupType")]
pub enum BlockGroup {
    ListItem(ListItem),
    FormatContainer(FormatContainer),
    General(GeneralBlock),
}

/// Block group discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockGroupType {
    Document,
    ListItem,
    FormatContainer,
    General,
    TableCell,
}

/// Ordered or unordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "OL")]
    Ordered,
    #[serde(rename = "UL")]
    Unordered,
}

impl ListType {
    pub fn tag_name(self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            ListType::Unordered => "ul",
        }
    }
}

/// One nesting depth of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLevel {
    pub list_type: ListType,
    #[serde(default, skip_serializing_if = "ListLevelFormat::is_empty")]
    pub format: ListLevelFormat,
    #[serde(default, skip_serializing_if = "Dataset::is_empty")]
    pub dataset: Dataset,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// A list item. `levels` holds every enclosing list, outermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    #[serde(default)]
    pub blocks: Vec<Block>,
    pub levels: Vec<ListLevel>,
    /// Marker carrying the format of the list bullet/number
    pub format_holder: Segment,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// A wrapper such as `blockquote` or `pre` around blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatContainer {
    pub tag_name: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// A foreign block element whose children are modeled as blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralBlock {
    pub element: ElementShell,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// Anything holding an ordered list of blocks.
pub trait BlockGroupContainer {
    fn group_type(&self) -> BlockGroupType;
    fn blocks(&self) -> &[Block];
    fn blocks_mut(&mut self) -> &mut Vec<Block>;
}

impl BlockGroupContainer for Document {
    fn group_type(&self) -> BlockGroupType {
        BlockGroupType::Document
    }
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl BlockGroupContainer for ListItem {
    fn group_type(&self) -> BlockGroupType {
        BlockGroupType::ListItem
    }
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl BlockGroupContainer for FormatContainer {
    fn group_type(&self) -> BlockGroupType {
        BlockGroupType::FormatContainer
    }
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl BlockGroupContainer for GeneralBlock {
    fn group_type(&self) -> BlockGroupType {
        BlockGroupType::General
    }
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl BlockGroupContainer for GeneralSegment {
    fn group_type(&self) -> BlockGroupType {
        BlockGroupType::General
    }
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl BlockGroupContainer for TableCell {
    fn group_type(&self) -> BlockGroupType {
        BlockGroupType::TableCell
    }
    fn blocks(&self) -> &[Block] {
        &self.blocks
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl BlockGroupContainer for BlockGroup {
    fn group_type(&self) -> BlockGroupType {
        match self {
            BlockGroup::ListItem(_) => BlockGroupType::ListItem,
            BlockGroup::FormatContainer(_) => BlockGroupType::FormatContainer,
            BlockGroup::General(_) => BlockGroupType::General,
        }
    }
    fn blocks(&self) -> &[Block] {
        match self {
            BlockGroup::ListItem(item) => &item.blocks,
            BlockGroup::FormatContainer(container) => &container.blocks,
            BlockGroup::General(general) => &general.blocks,
        }
    }
    fn blocks_mut(&mut self) -> &mut Vec<Block> {
        match self {
            BlockGroup::ListItem(item) => &mut item.blocks,
            BlockGroup::FormatContainer(container) => &mut container.blocks,
            BlockGroup::General(general) => &mut general.blocks,
        }
    }
}

impl ListItem {
    /// Whether the list marker and every block are selected.
    pub fn is_fully_selected(&self) -> bool {
        self.format_holder.is_selected
            && !self.blocks.is_empty()
            && self.blocks.iter().all(is_block_fully_selected)
    }
}

/// Whether a block counts as selected from edge to edge.
pub(crate) fn is_block_fully_selected(block: &Block) -> bool {
    match block {
        Block::Paragraph(paragraph) => {
            !paragraph.segments.is_empty()
                && paragraph
                    .segments
                    .iter()
                    .all(|s| s.is_selected || matches!(s.kind, SegmentKind::SelectionMarker))
                && paragraph.segments.iter().any(|s| s.is_selected)
        }
        Block::Table(table) => table.is_fully_selected(),
        Block::Divider(divider) => divider.is_selected,
        Block::Entity(entity) => entity.is_selected,
        Block::BlockGroup(BlockGroup::ListItem(item)) => item.is_fully_selected(),
        Block::BlockGroup(BlockGroup::FormatContainer(container)) => {
            !container.blocks.is_empty() && container.blocks.iter().all(is_block_fully_selected)
        }
        Block::BlockGroup(BlockGroup::General(general)) => general.is_selected,
    }
}
