//! Collection points for collaborators watching structural edits.

use crate::model::{Entity, Image};

/// How an entity left the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityOperation {
    /// Selected and deleted as part of a range
    Overwrite,
    /// Deleted by a forward delete at its start
    RemoveFromStart,
    /// Deleted by a backward delete at its end
    RemoveFromEnd,
}

/// An entity removed by an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedEntity {
    pub entity: Entity,
    pub operation: EntityOperation,
}

/// Changes reported by deletion and merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatContext {
    pub deleted_entities: Vec<DeletedEntity>,
    pub new_entities: Vec<Entity>,
    pub new_images: Vec<Image>,
}

impl FormatContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.deleted_entities.is_empty() && self.new_entities.is_empty() && self.new_images.is_empty()
    }
}
