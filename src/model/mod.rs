//! Content model types.
//!
//! The content model is a serializable tree of blocks and segments that
//! mirrors editable content without depending on it. Every node kind is a
//! tagged enum variant; JSON snapshots use `blockType`, `segmentType` and
//! `blockGroupType` discriminants with camelCase fields.

mod block;
pub mod creators;
mod decorator;
mod foreign;
mod format;
mod group;
pub mod mutation;
pub mod path;
mod segment;
pub mod selection;
mod table;

pub use block::{Block, BlockType, Divider, EntityBlock, Paragraph};
pub use decorator::{Code, Link, ParagraphDecorator};
pub use foreign::{ElementShell, ForeignNode};
pub use format::{
    is_white_space_preserved, BlockFormat, CodeFormat, Dataset, EntityFormat, LinkFormat,
    ListLevelFormat, SegmentFormat,
};
pub use group::{
    BlockGroup, BlockGroupContainer, BlockGroupType, Document, FormatContainer, GeneralBlock,
    ListItem, ListLevel, ListType,
};
pub use mutation::{mutate_block, mutate_segment, mutate_segments, CachedNode, SegmentHandle};
pub use path::{GroupPath, PathStep};
pub use segment::{Entity, GeneralSegment, Image, Segment, SegmentKind};
pub use selection::{InsertPoint, RunTarget, SelectionRun, TableContext};
pub use table::{Table, TableCell, TableRow};

/// serde helper: skip `false` booleans.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
