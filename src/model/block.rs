//! Block-level nodes.

use serde::{Deserialize, Serialize};

use super::decorator::ParagraphDecorator;
use super::format::{BlockFormat, SegmentFormat};
use super::group::BlockGroup;
use super::is_false;
use super::segment::{Entity, Segment};
use super::table::Table;
use crate::dom::NodeId;

/// A block in a block group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "blockType")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Divider(Divider),
    Entity(EntityBlock),
    BlockGroup(BlockGroup),
}

/// Block discriminant without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Table,
    Divider,
    Entity,
    BlockGroup,
}

/// A run of segments rendered as one line box (or an explicit wrapper).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    /// Format shared by every segment, hoisted by normalization
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub segment_format: SegmentFormat,
    /// No wrapper element exists for this paragraph in the source markup
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_implicit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator: Option<ParagraphDecorator>,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// A horizontal rule or an empty separator `div`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Divider {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "BlockFormat::is_empty")]
    pub format: BlockFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
    #[serde(skip)]
    pub cached_element: Option<NodeId>,
}

/// An entity standing on its own as a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityBlock {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "SegmentFormat::is_empty")]
    pub format: SegmentFormat,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_selected: bool,
}

impl Block {
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Paragraph(_) => BlockType::Paragraph,
            Block::Table(_) => BlockType::Table,
            Block::Divider(_) => BlockType::Divider,
            Block::Entity(_) => BlockType::Entity,
            Block::BlockGroup(_) => BlockType::BlockGroup,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut Paragraph> {
        match self {
            Block::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Block::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&BlockGroup> {
        match self {
            Block::BlockGroup(group) => Some(group),
            _ => None,
        }
    }

    /// Whether the block holds no content worth keeping: a paragraph
    /// without segments, a list item or format container without blocks,
    /// a table without rows.
    pub fn is_empty(&self) -> bool {
        match self {
            Block::Paragraph(paragraph) => paragraph.segments.is_empty(),
            Block::Table(table) => table.rows.is_empty(),
            Block::Divider(_) | Block::Entity(_) => false,
            Block::BlockGroup(BlockGroup::ListItem(item)) => item.blocks.is_empty(),
            Block::BlockGroup(BlockGroup::FormatContainer(container)) => {
                container.blocks.is_empty()
            }
            Block::BlockGroup(BlockGroup::General(_)) => false,
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

impl From<Divider> for Block {
    fn from(divider: Divider) -> Self {
        Block::Divider(divider)
    }
}

impl From<EntityBlock> for Block {
    fn from(entity: EntityBlock) -> Self {
        Block::Entity(entity)
    }
}

impl From<BlockGroup> for Block {
    fn from(group: BlockGroup) -> Self {
        Block::BlockGroup(group)
    }
}

impl Paragraph {
    /// Index of the first selection marker.
    pub fn marker_index(&self) -> Option<usize> {
        self.segments.iter().position(Segment::is_marker)
    }

    /// Whether any segment is selected.
    pub fn has_selection(&self) -> bool {
        self.segments.iter().any(|s| s.is_selected)
    }

    /// Plain text of the Text segments.
    pub fn text(&self) -> String {
        self.segments.iter().filter_map(Segment::text).collect()
    }
}
