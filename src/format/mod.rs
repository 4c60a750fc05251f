//! Format handlers shared by the importer and the exporter.
//!
//! Parsers read formats from elements (tag defaults first, then inline
//! style); appliers write formats back as inline style and attributes.

mod block;
mod defaults;
mod link;
mod segment;

pub use block::{
    apply_block_format, apply_dataset, apply_list_level_format, parse_block_format, parse_dataset,
    parse_list_level_format,
};
pub use defaults::{
    default_block_format, default_segment_format, heading_format, is_block_tag,
    is_paragraph_decorator_tag,
};
pub use link::{apply_code, apply_link, parse_code, parse_link};
pub use segment::{apply_segment_style, differs_from, parse_segment_format, push_script};
