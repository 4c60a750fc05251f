//! # content-model
//!
//! A serializable rich-text content model that sits between an editable
//! DOM surface and editing logic.
//!
//! Content is imported from a DOM subtree into a tree of blocks and
//! segments, edited as plain data (deletion, merge, normalization) and
//! written back, with the selection carried across both directions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use content_model::{content_model_to_html, html_to_content_model, render};
//! use content_model::{DomToModelOptions, ModelToDomOptions};
//!
//! fn main() -> content_model::Result<()> {
//!     let mut model = html_to_content_model("<p>Hello <b>world</b></p>", &DomToModelOptions::default())?;
//!     println!("{}", render::to_json(&model, render::JsonFormat::Pretty)?);
//!
//!     let html = content_model_to_html(&mut model, &ModelToDomOptions::default());
//!     println!("{}", html);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Arena DOM**: owned node tree with HTML fragment parsing and serialization
//! - **Import/export**: DOM to model and back, with selection mapping
//! - **Editing**: selection-driven deletion and structural merge
//! - **Normalization**: whitespace rules and table grid repair
//! - **Snapshots**: JSON and plain text output

pub mod dom;
pub mod dom_to_model;
pub mod edit;
pub mod error;
pub mod format;
pub mod model;
pub mod model_to_dom;
pub mod normalize;
pub mod render;

// Re-export commonly used types
pub use dom::{Dom, DomPoint, DomRange, DomSelection, NodeId};
pub use dom_to_model::{dom_to_content_model, DomToModelOptions};
pub use edit::{
    delete_selection, merge_model, DeleteResult, FormatContext, MergeFormatPolicy,
    MergeModelOptions,
};
pub use error::{Error, Result};
pub use model::{Block, BlockGroup, Document, Paragraph, Segment, SegmentKind, Table};
pub use model_to_dom::{content_model_to_dom, ModelToDomOptions};
pub use normalize::normalize_document;
pub use render::{content_model_to_text, JsonFormat, TextOptions};

use std::fs;
use std::path::Path;

/// Parse an HTML fragment and import it as a content model.
///
/// # Example
///
/// ```no_run
/// use content_model::{html_to_content_model, DomToModelOptions};
///
/// let model = html_to_content_model("<div>abc</div>", &DomToModelOptions::default()).unwrap();
/// assert_eq!(model.blocks.len(), 1);
/// ```
pub fn html_to_content_model(html: &str, options: &DomToModelOptions) -> Result<Document> {
    let mut dom = Dom::new();
    let root = dom.create_element("div");
    dom::parse_fragment(&mut dom, root, html)?;
    Ok(dom_to_content_model(&dom, root, options, None))
}

/// Write a content model out as an HTML fragment.
pub fn content_model_to_html(model: &mut Document, options: &ModelToDomOptions) -> String {
    let mut dom = Dom::new();
    let root = dom.create_element("div");
    content_model_to_dom(&mut dom, root, model, options);
    dom.inner_html(root)
}

/// Load a content model from a JSON snapshot file.
///
/// # Example
///
/// ```no_run
/// let model = content_model::read_model_file("model.json").unwrap();
/// println!("{} blocks", model.blocks.len());
/// ```
pub fn read_model_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = fs::read_to_string(path)?;
    render::from_json(&json)
}

/// Save a content model as a JSON snapshot file.
pub fn write_model_file<P: AsRef<Path>>(path: P, model: &Document, format: JsonFormat) -> Result<()> {
    let json = render::to_json(model, format)?;
    fs::write(path, json)?;
    Ok(())
}
