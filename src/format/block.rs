//! Block, list level and dataset format parsing and writing.

use crate::dom::{Dom, NodeId};
use crate::model::{BlockFormat, Dataset, ListLevelFormat};

/// Read block formatting from an element's inline style and legacy
/// attributes into `format`.
pub fn parse_block_format(dom: &Dom, node: NodeId, format: &mut BlockFormat) {
    if let Some(align) = dom.attribute(node, "align") {
        format.text_align = Some(align.to_ascii_lowercase());
    }
    if let Some(dir) = dom.attribute(node, "dir") {
        format.direction = Some(dir.to_ascii_lowercase());
    }

    for (name, value) in dom.styles(node) {
        match name.as_str() {
            "text-align" => format.text_align = Some(value),
            "direction" => format.direction = Some(value),
            "background-color" => format.background_color = Some(value),
            "margin" => {
                let [top, right, bottom, left] = expand_box(&value);
                format.margin_top = Some(top);
                format.margin_right = Some(right);
                format.margin_bottom = Some(bottom);
                format.margin_left = Some(left);
            }
            "margin-top" => format.margin_top = Some(value),
            "margin-right" => format.margin_right = Some(value),
            "margin-bottom" => format.margin_bottom = Some(value),
            "margin-left" => format.margin_left = Some(value),
            "padding" => {
                let [top, right, bottom, left] = expand_box(&value);
                format.padding_top = Some(top);
                format.padding_right = Some(right);
                format.padding_bottom = Some(bottom);
                format.padding_left = Some(left);
            }
            "padding-top" => format.padding_top = Some(value),
            "padding-right" => format.padding_right = Some(value),
            "padding-bottom" => format.padding_bottom = Some(value),
            "padding-left" => format.padding_left = Some(value),
            "border" => {
                format.border_top = Some(value.clone());
                format.border_right = Some(value.clone());
                format.border_bottom = Some(value.clone());
                format.border_left = Some(value);
            }
            "border-top" => format.border_top = Some(value),
            "border-right" => format.border_right = Some(value),
            "border-bottom" => format.border_bottom = Some(value),
            "border-left" => format.border_left = Some(value),
            "line-height" => format.line_height = Some(value),
            "white-space" => format.white_space = Some(value),
            "text-indent" => format.text_indent = Some(value),
            "vertical-align" => format.vertical_align = Some(value),
            "width" => format.width = Some(value),
            "height" => format.height = Some(value),
            "border-collapse" => format.border_collapse = Some(value == "collapse"),
            "box-sizing" => format.use_border_box = Some(value == "border-box"),
            "display" => format.display = Some(value),
            _ => {}
        }
    }
}

/// Expand a 1-4 value box shorthand into top/right/bottom/left.
fn expand_box(value: &str) -> [String; 4] {
    let parts: Vec<&str> = value.split_whitespace().collect();
    let pick = |i: usize| parts.get(i).copied().unwrap_or("0").to_string();
    match parts.len() {
        1 => [pick(0), pick(0), pick(0), pick(0)],
        2 => [pick(0), pick(1), pick(0), pick(1)],
        3 => [pick(0), pick(1), pick(2), pick(1)],
        _ => [pick(0), pick(1), pick(2), pick(3)],
    }
}

/// Write `format` as inline style onto `node`, skipping fields equal to
/// `inherited`.
pub fn apply_block_format(dom: &mut Dom, node: NodeId, format: &BlockFormat, inherited: &BlockFormat) {
    let mut set = |property: &str, value: &Option<String>, inherited: &Option<String>| {
        if let Some(value) = value {
            if Some(value) != inherited.as_ref() {
                dom.set_style(node, property, value);
            }
        }
    };

    set("text-align", &format.text_align, &inherited.text_align);
    set("direction", &format.direction, &inherited.direction);
    set(
        "background-color",
        &format.background_color,
        &inherited.background_color,
    );
    set("margin-top", &format.margin_top, &None);
    set("margin-right", &format.margin_right, &None);
    set("margin-bottom", &format.margin_bottom, &None);
    set("margin-left", &format.margin_left, &None);
    set("padding-top", &format.padding_top, &None);
    set("padding-right", &format.padding_right, &None);
    set("padding-bottom", &format.padding_bottom, &None);
    set("padding-left", &format.padding_left, &None);
    set("border-top", &format.border_top, &None);
    set("border-right", &format.border_right, &None);
    set("border-bottom", &format.border_bottom, &None);
    set("border-left", &format.border_left, &None);
    set("line-height", &format.line_height, &inherited.line_height);
    set("white-space", &format.white_space, &inherited.white_space);
    set("text-indent", &format.text_indent, &inherited.text_indent);
    set("vertical-align", &format.vertical_align, &None);
    set("width", &format.width, &None);
    set("height", &format.height, &None);
    set("display", &format.display, &None);

    if format.border_collapse == Some(true) {
        dom.set_style(node, "border-collapse", "collapse");
    }
    if format.use_border_box == Some(true) {
        dom.set_style(node, "box-sizing", "border-box");
    }
}

/// Read list level formatting from an `ol`/`ul` element.
pub fn parse_list_level_format(dom: &Dom, node: NodeId, format: &mut ListLevelFormat) {
    if let Some(start) = dom
        .attribute(node, "start")
        .and_then(|s| s.trim().parse::<u32>().ok())
    {
        format.start_number_override = Some(start);
    }
    if let Some(dir) = dom.attribute(node, "dir") {
        format.direction = Some(dir.to_ascii_lowercase());
    }
    for (name, value) in dom.styles(node) {
        match name.as_str() {
            "list-style-type" => format.list_style_type = Some(value),
            "margin-top" => format.margin_top = Some(value),
            "margin-bottom" => format.margin_bottom = Some(value),
            "margin-left" => format.margin_left = Some(value),
            "margin-right" => format.margin_right = Some(value),
            "padding-left" => format.padding_left = Some(value),
            "direction" => format.direction = Some(value),
            "text-align" => format.text_align = Some(value),
            _ => {}
        }
    }
}

/// Write list level formatting onto an `ol`/`ul` element.
pub fn apply_list_level_format(dom: &mut Dom, node: NodeId, format: &ListLevelFormat) {
    if let Some(start) = format.start_number_override {
        dom.set_attribute(node, "start", start.to_string());
    }
    let styles = [
        ("list-style-type", &format.list_style_type),
        ("margin-top", &format.margin_top),
        ("margin-bottom", &format.margin_bottom),
        ("margin-left", &format.margin_left),
        ("margin-right", &format.margin_right),
        ("padding-left", &format.padding_left),
        ("direction", &format.direction),
        ("text-align", &format.text_align),
    ];
    for (property, value) in styles {
        if let Some(value) = value {
            dom.set_style(node, property, value);
        }
    }
}

/// Collect `data-*` attributes.
pub fn parse_dataset(dom: &Dom, node: NodeId) -> Dataset {
    dom.element(node)
        .map(|element| {
            element
                .attributes
                .iter()
                .filter_map(|(name, value)| {
                    name.strip_prefix("data-")
                        .map(|key| (key.to_string(), value.clone()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Write `data-*` attributes.
pub fn apply_dataset(dom: &mut Dom, node: NodeId, dataset: &Dataset) {
    for (key, value) in dataset {
        dom.set_attribute(node, &format!("data-{}", key), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_shorthands() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        dom.set_attribute(div, "align", "Center");
        dom.set_attribute(div, "style", "margin: 1px 2px; border: 1px solid; white-space: pre");

        let mut format = BlockFormat::default();
        parse_block_format(&dom, div, &mut format);
        assert_eq!(format.text_align.as_deref(), Some("center"));
        assert_eq!(format.margin_top.as_deref(), Some("1px"));
        assert_eq!(format.margin_left.as_deref(), Some("2px"));
        assert_eq!(format.border_bottom.as_deref(), Some("1px solid"));
        assert!(format.is_white_space_preserved());
    }

    #[test]
    fn test_apply_block_format() {
        let mut dom = Dom::new();
        let td = dom.create_element("td");
        let format = BlockFormat {
            text_align: Some("center".into()),
            use_border_box: Some(true),
            ..Default::default()
        };
        apply_block_format(&mut dom, td, &format, &BlockFormat::default());
        assert_eq!(dom.style(td, "text-align").as_deref(), Some("center"));
        assert_eq!(dom.style(td, "box-sizing").as_deref(), Some("border-box"));
    }

    #[test]
    fn test_list_level_round_trip() {
        let mut dom = Dom::new();
        let ol = dom.create_element("ol");
        dom.set_attribute(ol, "start", "3");
        dom.set_attribute(ol, "style", "list-style-type: lower-alpha");

        let mut format = ListLevelFormat::default();
        parse_list_level_format(&dom, ol, &mut format);
        assert_eq!(format.start_number_override, Some(3));

        let copy = dom.create_element("ol");
        apply_list_level_format(&mut dom, copy, &format);
        assert_eq!(dom.outer_html(copy), dom.outer_html(ol));
    }

    #[test]
    fn test_dataset() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        dom.set_attribute(div, "data-id", "7");
        dom.set_attribute(div, "class", "x");

        let dataset = parse_dataset(&dom, div);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get("id").map(String::as_str), Some("7"));
    }
}
