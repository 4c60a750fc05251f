//! Character format parsing and writing.

use crate::dom::{Dom, NodeId};
use crate::model::SegmentFormat;

/// Legacy `<font size>` values 1-7.
const FONT_SIZES: [&str; 7] = ["10px", "13px", "16px", "18px", "24px", "32px", "48px"];

/// Read character formatting from an element's inline style (and the
/// legacy `font` attributes) into `format`.
pub fn parse_segment_format(dom: &Dom, node: NodeId, format: &mut SegmentFormat) {
    if dom.tag_name(node) == Some("font") {
        if let Some(face) = dom.attribute(node, "face") {
            format.font_family = Some(face.to_string());
        }
        if let Some(color) = dom.attribute(node, "color") {
            format.text_color = Some(color.to_string());
        }
        if let Some(size) = dom
            .attribute(node, "size")
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            format.font_size = Some(FONT_SIZES[size.clamp(1, 7) - 1].to_string());
        }
    }

    for (name, value) in dom.styles(node) {
        match name.as_str() {
            "font-family" => format.font_family = Some(value),
            "font-size" => format.font_size = Some(value),
            "color" => format.text_color = Some(value),
            "background-color" => format.background_color = Some(value),
            "font-weight" => format.font_weight = Some(value),
            "font-style" => format.italic = Some(value == "italic" || value == "oblique"),
            "text-decoration" | "text-decoration-line" => {
                if value.contains("underline") {
                    format.underline = Some(true);
                }
                if value.contains("line-through") {
                    format.strikethrough = Some(true);
                }
                if value == "none" {
                    format.underline = Some(false);
                    format.strikethrough = Some(false);
                }
            }
            "vertical-align" if value == "super" || value == "sub" => {
                push_script(format, &value);
            }
            "line-height" => format.line_height = Some(value),
            "letter-spacing" => format.letter_spacing = Some(value),
            _ => {}
        }
    }
}

/// Append `super` or `sub` to the script sequence.
pub fn push_script(format: &mut SegmentFormat, script: &str) {
    format.super_or_sub_script_sequence = Some(match &format.super_or_sub_script_sequence {
        Some(existing) if !existing.is_empty() => format!("{} {}", existing, script),
        _ => script.to_string(),
    });
}

/// Write the style-expressible part of `format` onto `node`, skipping
/// fields equal to `inherited`. Returns whether anything was written.
///
/// Underline, strikethrough and scripts are expressed by wrapper elements
/// and are not handled here.
pub fn apply_segment_style(
    dom: &mut Dom,
    node: NodeId,
    format: &SegmentFormat,
    inherited: &SegmentFormat,
) -> bool {
    let mut written = false;
    let mut set = |property: &str, value: &Option<String>, inherited: &Option<String>| {
        if let Some(value) = value {
            if Some(value) != inherited.as_ref() {
                dom.set_style(node, property, value);
                written = true;
            }
        }
    };

    set("font-family", &format.font_family, &inherited.font_family);
    set("font-size", &format.font_size, &inherited.font_size);
    set("color", &format.text_color, &inherited.text_color);
    set(
        "background-color",
        &format.background_color,
        &inherited.background_color,
    );
    set("font-weight", &format.font_weight, &inherited.font_weight);
    set("line-height", &format.line_height, &inherited.line_height);
    set(
        "letter-spacing",
        &format.letter_spacing,
        &inherited.letter_spacing,
    );

    if let Some(italic) = format.italic {
        if inherited.italic.unwrap_or(false) != italic {
            let value = if italic { "italic" } else { "normal" };
            dom.set_style(node, "font-style", value);
            written = true;
        }
    }
    written
}

/// Whether `format` needs anything written beyond `inherited`.
pub fn differs_from(format: &SegmentFormat, inherited: &SegmentFormat) -> bool {
    let differs = |a: &Option<String>, b: &Option<String>| a.is_some() && a != b;
    let flag = |a: Option<bool>, b: Option<bool>| {
        a.is_some() && a.unwrap_or(false) != b.unwrap_or(false)
    };

    differs(&format.font_family, &inherited.font_family)
        || differs(&format.font_size, &inherited.font_size)
        || differs(&format.text_color, &inherited.text_color)
        || differs(&format.background_color, &inherited.background_color)
        || differs(&format.font_weight, &inherited.font_weight)
        || differs(&format.line_height, &inherited.line_height)
        || differs(&format.letter_spacing, &inherited.letter_spacing)
        || flag(format.italic, inherited.italic)
        || flag(format.underline, inherited.underline)
        || flag(format.strikethrough, inherited.strikethrough)
        || differs(
            &format.super_or_sub_script_sequence,
            &inherited.super_or_sub_script_sequence,
        )
}
