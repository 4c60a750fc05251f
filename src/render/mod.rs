//! Reading a content model out: plain text and JSON snapshots.

mod json;
mod options;
mod text;
pub mod visitor;

pub use json::{from_json, to_json, JsonFormat};
pub use options::{TextOptions, HR_TEXT};
pub use text::{content_model_to_text, content_model_to_text_with_visitor};
pub use visitor::{
    CompositeVisitor, DefaultVisitor, SimpleTableVisitor, SkipImagesVisitor, TextVisitor,
    VisitorAction,
};
