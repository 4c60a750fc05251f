//! Visitor pattern for customizing text extraction.
//!
//! A visitor is consulted before each paragraph, table, image, entity and
//! divider is turned into text, and may keep, replace or drop it.
//!
//! # Example
//!
//! ```
//! use content_model::render::visitor::{TextVisitor, VisitorAction};
//! use content_model::model::Table;
//!
//! struct OmitTables;
//!
//! impl TextVisitor for OmitTables {
//!     fn visit_table(&mut self, _table: &Table) -> VisitorAction {
//!         VisitorAction::Replace("[table]".to_string())
//!     }
//! }
//! ```

use crate::model::{Divider, Entity, Image, Paragraph, Table};

/// Action returned by visitor methods to control text output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with the default text.
    #[default]
    Continue,

    /// Replace the element with custom text.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting model elements during text extraction.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait TextVisitor {
    /// Called before a paragraph becomes a line.
    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> VisitorAction {
        let _ = paragraph;
        VisitorAction::Continue
    }

    /// Called before a table's cells are walked.
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called for each inline image.
    fn visit_image(&mut self, image: &Image) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called for each entity, inline or block.
    fn visit_entity(&mut self, entity: &Entity) -> VisitorAction {
        let _ = entity;
        VisitorAction::Continue
    }

    /// Called for each divider.
    fn visit_divider(&mut self, divider: &Divider) -> VisitorAction {
        let _ = divider;
        VisitorAction::Continue
    }
}

/// Visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl TextVisitor for DefaultVisitor {}

/// Visitor that drops all images.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl TextVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _image: &Image) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that writes each table row as one pipe-separated line.
#[derive(Debug, Clone, Default)]
pub struct SimpleTableVisitor;

impl TextVisitor for SimpleTableVisitor {
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let rows: Vec<String> = table
            .rows
            .iter()
            .map(|row| {
                let cells: Vec<String> = row
                    .cells
                    .iter()
                    .filter(|cell| !cell.span_left && !cell.span_above)
                    .map(|cell| {
                        cell.blocks
                            .iter()
                            .filter_map(|block| block.as_paragraph())
                            .map(Paragraph::text)
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                cells.join(" | ")
            })
            .collect();
        VisitorAction::Replace(rows.join("\n"))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
#[derive(Default)]
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn TextVisitor>>,
}

impl CompositeVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: TextVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(&mut self, visit: impl Fn(&mut Box<dyn TextVisitor>) -> VisitorAction) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl TextVisitor for CompositeVisitor {
    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(paragraph))
    }

    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        self.first_action(|v| v.visit_table(table))
    }

    fn visit_image(&mut self, image: &Image) -> VisitorAction {
        self.first_action(|v| v.visit_image(image))
    }

    fn visit_entity(&mut self, entity: &Entity) -> VisitorAction {
        self.first_action(|v| v.visit_entity(entity))
    }

    fn visit_divider(&mut self, divider: &Divider) -> VisitorAction {
        self.first_action(|v| v.visit_divider(divider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::*;
    use crate::model::SegmentKind;

    fn image() -> Image {
        match create_image("a.png", None).kind {
            SegmentKind::Image(image) => image,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_visitor_action_default() {
        assert_eq!(VisitorAction::default(), VisitorAction::Continue);
        assert!(VisitorAction::Skip.should_skip());
        assert_eq!(VisitorAction::Replace("x".into()).replacement(), Some("x"));
        assert!(VisitorAction::Continue.replacement().is_none());
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(SkipImagesVisitor)
            .with_visitor(DefaultVisitor);

        assert!(composite.visit_image(&image()).should_skip());
        let paragraph = create_paragraph(false, None, None, None);
        assert_eq!(composite.visit_paragraph(&paragraph), VisitorAction::Continue);
    }

    #[test]
    fn test_simple_table_visitor() {
        let mut table = create_table(0, None);
        let mut row = create_table_row(None, 0.0);
        for text in ["a", "b"] {
            let mut cell = create_table_cell(false, false, false, None, None);
            let mut paragraph = create_paragraph(true, None, None, None);
            paragraph.segments.push(create_text(text, None, None, None));
            cell.blocks.push(paragraph.into());
            row.cells.push(cell);
        }
        row.cells.push(create_table_cell(true, false, false, None, None));
        table.rows.push(row);

        let action = SimpleTableVisitor.visit_table(&table);
        assert_eq!(action.replacement(), Some("a | b"));
    }
}
