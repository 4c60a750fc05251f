//! The sanctioned path from a read-only node to a mutable one.
//!
//! A shared borrow is the read-only view and an exclusive borrow is the
//! mutable view of the same allocation. Going through these functions
//! before editing drops any cached render handle, so the exporter never
//! reuses DOM for a node whose content has changed.

use super::block::{Block, Divider, Paragraph};
use super::group::{BlockGroup, ListItem};
use super::segment::Segment;
use super::table::{Table, TableCell, TableRow};

/// A node that may hold a cached render handle.
pub trait CachedNode {
    /// Forget the cached handle, along with those of table rows and list
    /// levels the node owns.
    fn drop_cache(&mut self);
}

impl CachedNode for Paragraph {
    fn drop_cache(&mut self) {
        self.cached_element = None;
    }
}

impl CachedNode for Divider {
    fn drop_cache(&mut self) {
        self.cached_element = None;
    }
}

impl CachedNode for Table {
    fn drop_cache(&mut self) {
        self.cached_element = None;
        for row in &mut self.rows {
            row.cached_element = None;
        }
    }
}

impl CachedNode for TableRow {
    fn drop_cache(&mut self) {
        self.cached_element = None;
    }
}

impl CachedNode for TableCell {
    fn drop_cache(&mut self) {
        self.cached_element = None;
    }
}

impl CachedNode for ListItem {
    fn drop_cache(&mut self) {
        self.cached_element = None;
        for level in &mut self.levels {
            level.cached_element = None;
        }
    }
}

impl CachedNode for BlockGroup {
    fn drop_cache(&mut self) {
        match self {
            BlockGroup::ListItem(item) => item.drop_cache(),
            BlockGroup::FormatContainer(container) => container.cached_element = None,
            BlockGroup::General(general) => general.cached_element = None,
        }
    }
}

impl CachedNode for Block {
    fn drop_cache(&mut self) {
        match self {
            Block::Paragraph(paragraph) => paragraph.drop_cache(),
            Block::Table(table) => table.drop_cache(),
            Block::Divider(divider) => divider.drop_cache(),
            Block::Entity(_) => {}
            Block::BlockGroup(group) => group.drop_cache(),
        }
    }
}

/// Identity of a segment: its address inside the owning paragraph.
///
/// A handle stays meaningful only while the owning segment vector is not
/// structurally changed (no insert/remove/reallocation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentHandle(usize);

impl SegmentHandle {
    pub fn of(segment: &Segment) -> Self {
        Self(segment as *const Segment as usize)
    }
}

/// Mutable view of a block (or of a table row, cell or list item), with
/// its cache and its rows' or levels' caches dropped.
pub fn mutate_block<T: CachedNode + ?Sized>(block: &mut T) -> &mut T {
    block.drop_cache();
    block
}

/// Mutable view of a paragraph plus the indices of the given segments in
/// it. Handles that do not belong to the paragraph are dropped.
pub fn mutate_segments<'a>(
    paragraph: &'a mut Paragraph,
    handles: &[SegmentHandle],
) -> (&'a mut Paragraph, Vec<usize>) {
    let paragraph = mutate_block(paragraph);
    let indices = handles
        .iter()
        .filter_map(|handle| {
            paragraph
                .segments
                .iter()
                .position(|segment| SegmentHandle::of(segment) == *handle)
        })
        .collect();
    (paragraph, indices)
}

/// Single segment form of [`mutate_segments`]: runs `callback` on the
/// segment and returns its index, or returns `None` without calling back
/// when the segment is not in the paragraph.
pub fn mutate_segment<F>(paragraph: &mut Paragraph, handle: SegmentHandle, callback: F) -> Option<usize>
where
    F: FnOnce(&mut Segment, usize),
{
    let (paragraph, indices) = mutate_segments(paragraph, &[handle]);
    let index = *indices.first()?;
    callback(&mut paragraph.segments[index], index);
    Some(index)
}
