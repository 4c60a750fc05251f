//! Property tests for paragraph and table normalization.

use content_model::model::creators::*;
use content_model::model::{Paragraph, Segment, Table, TableCell, TableRow};
use content_model::normalize::{normalize_paragraph, normalize_table};
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![Just('a'), Just(' '), Just('\u{00A0}'), Just('\t')],
        0..5,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        4 => arb_text().prop_map(|text| create_text(text, None, None, None)),
        1 => Just(create_br(None)),
        1 => Just(create_image("x.png", None)),
    ]
}

/// Random segments with at most one selection marker.
fn arb_paragraph() -> impl Strategy<Value = Paragraph> {
    (
        prop::collection::vec(arb_segment(), 0..8),
        any::<Option<prop::sample::Index>>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(segments, marker, is_implicit, preserved)| {
            let mut paragraph = create_paragraph(is_implicit, None, None, None);
            if preserved {
                paragraph.format.white_space = Some("pre".into());
            }
            paragraph.segments = segments;
            if let Some(marker) = marker {
                let at = marker.index(paragraph.segments.len() + 1);
                paragraph
                    .segments
                    .insert(at, create_selection_marker(None));
            }
            paragraph
        })
}

fn arb_cell() -> impl Strategy<Value = TableCell> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(span_left, span_above, is_header, has_text)| {
            let mut cell = create_table_cell(span_left, span_above, is_header, None, None);
            if has_text {
                let mut paragraph = create_paragraph(false, None, None, None);
                paragraph.segments.push(create_text("x", None, None, None));
                cell.blocks.push(paragraph.into());
            }
            cell
        },
    )
}

fn arb_row() -> impl Strategy<Value = TableRow> {
    (prop::collection::vec(arb_cell(), 1..=4), 0u16..80).prop_map(|(cells, height)| {
        let mut row = create_table_row(None, f32::from(height));
        row.cells = cells;
        row
    })
}

/// Ragged grids up to 4x4 with random spans and sizes.
fn arb_table() -> impl Strategy<Value = Table> {
    (
        prop::collection::vec(arb_row(), 1..=4),
        prop::collection::vec(1u16..200, 0..=5),
    )
        .prop_map(|(rows, widths)| {
            let mut table = create_table(0, None);
            table.rows = rows;
            table.widths = widths.into_iter().map(f32::from).collect();
            table
        })
}

proptest! {
    #[test]
    fn prop_paragraph_normalization_is_idempotent(paragraph in arb_paragraph()) {
        let mut once = paragraph;
        normalize_paragraph(&mut once);
        let mut twice = once.clone();
        normalize_paragraph(&mut twice);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_table_normalization_is_idempotent(table in arb_table()) {
        let mut once = table;
        normalize_table(&mut once, None);
        let mut twice = once.clone();
        normalize_table(&mut twice, None);
        prop_assert_eq!(&twice, &once);

        let columns = once.column_count();
        prop_assert!(once.rows.iter().all(|row| row.cells.len() == columns));
        prop_assert_eq!(once.widths.len(), columns);
        prop_assert!(once.rows[0].cells.iter().all(|cell| !cell.span_above));
        prop_assert!(once.rows.iter().all(|row| !row.cells[0].span_left));
        prop_assert!(once
            .rows
            .iter()
            .all(|row| row.cells.iter().all(|cell| !cell.blocks.is_empty())));
    }
}
