//! Link and code decorator parsing and writing.

use crate::dom::{Dom, NodeId};
use crate::model::{Code, Link, LinkFormat};

use super::block::{apply_dataset, parse_dataset};

/// Read a link decorator from an `a` element. Anchors without `href` or
/// `name` are not links.
pub fn parse_link(dom: &Dom, node: NodeId) -> Option<Link> {
    let format = LinkFormat {
        href: dom.attribute(node, "href").map(str::to_string),
        target: dom.attribute(node, "target").map(str::to_string),
        anchor_title: dom.attribute(node, "title").map(str::to_string),
        name: dom.attribute(node, "name").map(str::to_string),
        underline: dom
            .style(node, "text-decoration")
            .map(|value| value.contains("underline")),
    };
    if format.href.is_none() && format.name.is_none() {
        return None;
    }
    Some(Link {
        format,
        dataset: parse_dataset(dom, node),
    })
}

/// Write a link decorator onto an `a` element.
pub fn apply_link(dom: &mut Dom, node: NodeId, link: &Link) {
    let format = &link.format;
    let attributes = [
        ("href", &format.href),
        ("target", &format.target),
        ("title", &format.anchor_title),
        ("name", &format.name),
    ];
    for (name, value) in attributes {
        if let Some(value) = value {
            dom.set_attribute(node, name, value.clone());
        }
    }
    match format.underline {
        Some(false) => dom.set_style(node, "text-decoration", "none"),
        Some(true) => dom.set_style(node, "text-decoration", "underline"),
        None => {}
    }
    apply_dataset(dom, node, &link.dataset);
}

/// Read a code decorator from a `code` element.
pub fn parse_code(dom: &Dom, node: NodeId) -> Code {
    let mut code = Code::default();
    code.format.font_family = dom.style(node, "font-family");
    code
}

/// Write a code decorator onto a `code` element.
pub fn apply_code(dom: &mut Dom, node: NodeId, code: &Code) {
    if let Some(font_family) = &code.format.font_family {
        dom.set_style(node, "font-family", font_family);
    }
}
