//! Formats implied by tag names, before any inline style applies.

use crate::model::{BlockFormat, SegmentFormat};

/// Character format implied by an inline or heading tag.
pub fn default_segment_format(tag_name: &str) -> Option<SegmentFormat> {
    let format = match tag_name {
        "b" | "strong" => SegmentFormat {
            font_weight: Some("bold".into()),
            ..Default::default()
        },
        "i" | "em" => SegmentFormat {
            italic: Some(true),
            ..Default::default()
        },
        "u" | "ins" => SegmentFormat {
            underline: Some(true),
            ..Default::default()
        },
        "s" | "strike" | "del" => SegmentFormat {
            strikethrough: Some(true),
            ..Default::default()
        },
        "sup" => SegmentFormat {
            super_or_sub_script_sequence: Some("super".into()),
            ..Default::default()
        },
        "sub" => SegmentFormat {
            super_or_sub_script_sequence: Some("sub".into()),
            ..Default::default()
        },
        "pre" | "code" => SegmentFormat {
            font_family: Some("monospace".into()),
            ..Default::default()
        },
        _ => {
            let level = tag_name.strip_prefix('h')?.parse::<u8>().ok()?;
            return heading_format(level);
        }
    };
    Some(format)
}

/// Font size and weight of a heading level.
pub fn heading_format(level: u8) -> Option<SegmentFormat> {
    let size = match level {
        1 => "2em",
        2 => "1.5em",
        3 => "1.17em",
        4 => "1em",
        5 => "0.83em",
        6 => "0.67em",
        _ => return None,
    };
    Some(SegmentFormat {
        font_size: Some(size.into()),
        font_weight: Some("bold".into()),
        ..Default::default()
    })
}

/// Block format implied by a block tag.
pub fn default_block_format(tag_name: &str) -> Option<BlockFormat> {
    let format = match tag_name {
        "p" => BlockFormat {
            margin_top: Some("1em".into()),
            margin_bottom: Some("1em".into()),
            ..Default::default()
        },
        "blockquote" => BlockFormat {
            margin_top: Some("1em".into()),
            margin_bottom: Some("1em".into()),
            margin_left: Some("40px".into()),
            margin_right: Some("40px".into()),
            ..Default::default()
        },
        "pre" => BlockFormat {
            white_space: Some("pre".into()),
            margin_top: Some("1em".into()),
            margin_bottom: Some("1em".into()),
            ..Default::default()
        },
        "center" => BlockFormat {
            text_align: Some("center".into()),
            ..Default::default()
        },
        _ => return None,
    };
    Some(format)
}

/// Whether the tag starts a block in default rendering.
pub fn is_block_tag(tag_name: &str) -> bool {
    matches!(
        tag_name,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "center"
            | "dd"
            | "details"
            | "dialog"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "ul"
    )
}

/// Tags the importer turns into a paragraph with a decorator.
pub fn is_paragraph_decorator_tag(tag_name: &str) -> bool {
    matches!(tag_name, "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
