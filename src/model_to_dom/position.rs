//! Turning recorded anchors into DOM positions.

use super::context::Anchor;
use crate::dom::{Dom, DomPoint};

/// The DOM position just after an anchor.
///
/// A text anchor resolves to the end of its text; any other node to its
/// parent at the index after it; a missing segment to the start of the
/// block.
pub fn calc_position(dom: &Dom, anchor: &Anchor) -> Option<DomPoint> {
    let Some(segment) = anchor.segment else {
        return Some(DomPoint::new(anchor.block, 0));
    };
    if dom.is_text(segment) {
        return Some(DomPoint::new(segment, dom.node_length(segment)));
    }
    let parent = dom.parent(segment)?;
    let index = dom.child_index(segment)?;
    Some(DomPoint::new(parent, index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let mut dom = Dom::new();
        let div = dom.create_element("div");
        let text = dom.create_text("abc");
        let br = dom.create_element("br");
        dom.append_child(div, text);
        dom.append_child(div, br);

        let at = |segment| calc_position(&dom, &Anchor { block: div, segment });
        assert_eq!(at(None), Some(DomPoint::new(div, 0)));
        assert_eq!(at(Some(text)), Some(DomPoint::new(text, 3)));
        assert_eq!(at(Some(br)), Some(DomPoint::new(div, 2)));

        let detached = dom.create_element("img");
        assert_eq!(calc_position(&dom, &Anchor { block: div, segment: Some(detached) }), None);
    }
}
