//! Structural edits on the content model: selection-driven deletion and
//! merging one model into another.
//!
//! Both operations work on the tree alone and report entities and images
//! they add or remove through an optional [`FormatContext`].

mod delete_block;
mod delete_segment;
mod delete_selection;
mod format_context;
mod merge;

pub use delete_block::delete_block;
pub use delete_segment::{delete_segment, DeleteDirection};
pub use delete_selection::{
    delete_all_segment_before, delete_char_backward, delete_char_forward, delete_selection,
    DeleteResult, DeleteSelectionContext, DeleteSelectionResult, DeleteSelectionStep,
};
pub use format_context::{DeletedEntity, EntityOperation, FormatContext};
pub use merge::{merge_model, split_paragraph, MergeFormatPolicy, MergeModelOptions};
