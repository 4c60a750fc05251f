//! Addressing nested block groups by index path.
//!
//! A [`GroupPath`] is a list of steps from a root group down to a nested
//! group. Resolving it mutably drops the cached render handle of every node
//! entered on the way down, so a deep edit can never leave a stale ancestor
//! cache behind.

use super::block::{Block, Paragraph};
use super::group::BlockGroupContainer;
use super::mutation::mutate_block;
use super::segment::SegmentKind;

/// One step from a group into a child group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Enter the block group at this block index
    Block(usize),
    /// Enter a cell of the table at this block index
    TableCell { block: usize, row: usize, col: usize },
    /// Enter an inline General segment of the paragraph at this block index
    GeneralSegment { block: usize, segment: usize },
}

impl PathStep {
    /// Block index this step enters through.
    pub fn block_index(self) -> usize {
        match self {
            PathStep::Block(block)
            | PathStep::TableCell { block, .. }
            | PathStep::GeneralSegment { block, .. } => block,
        }
    }
}

/// Path from a root group to a nested group; empty means the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupPath {
    pub steps: Vec<PathStep>,
}

impl GroupPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// This path extended by one step.
    pub fn child(&self, step: PathStep) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// The enclosing path and the last step, if any.
    pub fn split_last(&self) -> Option<(GroupPath, PathStep)> {
        let (last, rest) = self.steps.split_last()?;
        Some((
            GroupPath {
                steps: rest.to_vec(),
            },
            *last,
        ))
    }

    /// Whether the innermost step enters a table cell.
    pub fn ends_in_table_cell(&self) -> bool {
        matches!(self.steps.last(), Some(PathStep::TableCell { .. }))
    }
}

fn step_ref(group: &dyn BlockGroupContainer, step: PathStep) -> Option<&dyn BlockGroupContainer> {
    match step {
        PathStep::Block(index) => match group.blocks().get(index)? {
            Block::BlockGroup(inner) => Some(inner as &dyn BlockGroupContainer),
            _ => None,
        },
        PathStep::TableCell { block, row, col } => match group.blocks().get(block)? {
            Block::Table(table) => Some(table.cell(row, col)? as &dyn BlockGroupContainer),
            _ => None,
        },
        PathStep::GeneralSegment { block, segment } => match group.blocks().get(block)? {
            Block::Paragraph(paragraph) => match &paragraph.segments.get(segment)?.kind {
                SegmentKind::General(general) => Some(general as &dyn BlockGroupContainer),
                _ => None,
            },
            _ => None,
        },
    }
}

fn step_mut(
    group: &mut dyn BlockGroupContainer,
    step: PathStep,
) -> Option<&mut dyn BlockGroupContainer> {
    match step {
        PathStep::Block(index) => match group.blocks_mut().get_mut(index)? {
            Block::BlockGroup(inner) => Some(mutate_block(inner) as &mut dyn BlockGroupContainer),
            _ => None,
        },
        PathStep::TableCell { block, row, col } => match group.blocks_mut().get_mut(block)? {
            Block::Table(table) => {
                Some(mutate_block(table).cell_mut(row, col)? as &mut dyn BlockGroupContainer)
            }
            _ => None,
        },
        PathStep::GeneralSegment { block, segment } => match group.blocks_mut().get_mut(block)? {
            Block::Paragraph(paragraph) => {
                match &mut mutate_block(paragraph).segments.get_mut(segment)?.kind {
                    SegmentKind::General(general) => Some(general as &mut dyn BlockGroupContainer),
                    _ => None,
                }
            }
            _ => None,
        },
    }
}

/// Read-only view of the group at `path` below `root`.
pub fn resolve_group<'a>(
    root: &'a dyn BlockGroupContainer,
    path: &GroupPath,
) -> Option<&'a dyn BlockGroupContainer> {
    let mut group = root;
    for step in &path.steps {
        group = step_ref(group, *step)?;
    }
    Some(group)
}

/// Mutable view of the group at `path` below `root`, dropping the caches
/// of every node on the way.
pub fn resolve_group_mut<'a>(
    root: &'a mut dyn BlockGroupContainer,
    path: &GroupPath,
) -> Option<&'a mut dyn BlockGroupContainer> {
    let mut group = root;
    for step in &path.steps {
        group = step_mut(group, *step)?;
    }
    Some(group)
}

/// Mutable paragraph at `block_index` of the group at `path`, with its own
/// cache dropped.
pub fn resolve_paragraph_mut<'a>(
    root: &'a mut dyn BlockGroupContainer,
    path: &GroupPath,
    block_index: usize,
) -> Option<&'a mut Paragraph> {
    let group = resolve_group_mut(root, path)?;
    let paragraph = group.blocks_mut().get_mut(block_index)?.as_paragraph_mut()?;
    Some(mutate_block(paragraph))
}
