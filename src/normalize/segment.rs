//! Whitespace pass over the segments of one paragraph.
//!
//! Walks the segments left to right, line by line (a Br ends a line), and
//! rewrites space runs at segment edges so the model spells out what a
//! renderer would otherwise collapse:
//!
//! - a leading run becomes nothing at line start or after a space, and one
//!   non-breaking space otherwise;
//! - a trailing run becomes one plain space;
//! - a trailing non-breaking space turns back into a plain space once more
//!   inline content follows it on the line;
//! - trailing spaces at the end of a line are stripped, reaching back
//!   through text segments the strip empties.

use crate::model::{Segment, SegmentKind};

pub(crate) const NBSP: char = '\u{00A0}';

#[derive(Default)]
struct LineState {
    /// Index of the first segment on this line
    start: usize,
    /// Indices of text segments seen on this line
    text_segments: Vec<usize>,
    /// A leading space run would follow a space (or line start)
    ignore_leading_spaces: bool,
    last_inline: Option<usize>,
}

impl LineState {
    fn new(start: usize) -> Self {
        Self {
            start,
            ignore_leading_spaces: true,
            ..Default::default()
        }
    }

    fn finish(&self, segments: &mut [Segment]) {
        for &index in &self.text_segments {
            if Some(index) == self.last_inline {
                continue;
            }
            if let Some(text) = segments[index].text_mut() {
                let mut chars: Vec<char> = text.chars().collect();
                let len = chars.len();
                if chars.last() == Some(&NBSP) && (len < 2 || chars[len - 2] != ' ') {
                    chars[len - 1] = ' ';
                    *text = chars.into_iter().collect();
                }
            }
        }

        if let Some(end) = self.last_inline {
            trim_line_end(&mut segments[self.start..=end]);
        }
    }
}

/// Strip trailing spaces from the text at the end of a line. A text left
/// empty passes the trim on to the text before it.
fn trim_line_end(line: &mut [Segment]) {
    for segment in line.iter_mut().rev() {
        if segment.is_marker() {
            continue;
        }
        let Some(text) = segment.text_mut() else {
            break;
        };
        let trimmed = text.trim_end_matches(' ').len();
        text.truncate(trimmed);
        if !text.is_empty() {
            break;
        }
    }
}

fn has_spaces_only(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

/// Normalize edge whitespace of text segments.
///
/// Empty text segments are skipped: they neither move the line state nor
/// get rewritten.
pub fn normalize_segments(segments: &mut [Segment]) {
    let mut state = LineState::new(0);

    for index in 0..segments.len() {
        let mut line_break = false;
        match &mut segments[index].kind {
            SegmentKind::Br => line_break = true,
            SegmentKind::Entity(_) | SegmentKind::General(_) | SegmentKind::Image(_) => {
                state.last_inline = Some(index);
                state.ignore_leading_spaces = false;
            }
            SegmentKind::SelectionMarker => {}
            SegmentKind::Text { text } => {
                if text.is_empty() {
                    continue;
                }
                state.text_segments.push(index);
                state.last_inline = Some(index);

                if !has_spaces_only(text) {
                    if text.starts_with(' ') {
                        let rest = text.trim_start_matches(' ');
                        *text = if state.ignore_leading_spaces {
                            rest.to_string()
                        } else {
                            format!("{}{}", NBSP, rest)
                        };
                    }
                    if text.ends_with(' ') {
                        let rest = text.trim_end_matches(' ');
                        *text = format!("{} ", rest);
                    }
                }
                state.ignore_leading_spaces = text.ends_with(' ');
            }
        }

        if line_break {
            state.finish(segments);
            state = LineState::new(index + 1);
        }
    }

    state.finish(segments);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::creators::{create_br, create_image, create_text};

    fn texts(segments: &[Segment]) -> Vec<String> {
        segments
            .iter()
            .map(|s| s.text().unwrap_or("<>").to_string())
            .collect()
    }

    fn text_segments(values: &[&str]) -> Vec<Segment> {
        values
            .iter()
            .map(|v| create_text(*v, None, None, None))
            .collect()
    }

    #[test]
    fn test_interior_empty_segment() {
        let mut segments = text_segments(&[" a ", "", " b "]);
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a ", "", "b"]);
    }

    #[test]
    fn test_leading_space_after_content_becomes_nbsp() {
        let mut segments = text_segments(&["a", "   b"]);
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a", "\u{00A0}b"]);
    }

    #[test]
    fn test_trailing_run_collapses() {
        let mut segments = text_segments(&["a   ", "b"]);
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a ", "b"]);
    }

    #[test]
    fn test_trailing_nbsp_fixed_when_followed() {
        let mut segments = text_segments(&["a\u{00A0}", "b"]);
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a ", "b"]);
    }

    #[test]
    fn test_br_resets_line() {
        let mut segments = vec![
            create_text("a ", None, None, None),
            create_br(None),
            create_text(" b", None, None, None),
        ];
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a", "<>", "b"]);
    }

    #[test]
    fn test_image_keeps_following_space() {
        let mut segments = vec![
            create_image("x.png", None),
            create_text(" b", None, None, None),
        ];
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["<>", "\u{00A0}b"]);
    }

    #[test]
    fn test_trim_reaches_back_through_emptied_text() {
        let mut segments = text_segments(&["a ", " "]);
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a", ""]);

        let mut segments = text_segments(&["", "a\u{00A0} ", " "]);
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["", "a\u{00A0}", ""]);
    }

    #[test]
    fn test_trim_stops_at_image() {
        let mut segments = vec![
            create_text("a ", None, None, None),
            create_image("x.png", None),
            create_text(" ", None, None, None),
        ];
        normalize_segments(&mut segments);
        assert_eq!(texts(&segments), vec!["a ", "<>", ""]);
    }

    #[test]
    fn test_idempotent() {
        let mut segments = text_segments(&["  a  ", " b\u{00A0}", "c   "]);
        normalize_segments(&mut segments);
        let once = segments.clone();
        normalize_segments(&mut segments);
        assert_eq!(segments, once);
    }
}
