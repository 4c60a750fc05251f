//! HTML serialization and a tolerant fragment parser.
//!
//! The parser understands what editable content actually contains: start and
//! end tags, quoted/unquoted/bare attributes, void elements, comments (which
//! are skipped) and the common character references. Mismatched end tags
//! close up to the nearest matching open element; unmatched ones are ignored.

use super::{Dom, NodeId, NodeKind};
use crate::error::{Error, Result};

/// Elements that never have children or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{00A0}', "&nbsp;")
}

/// Escape an attribute value for a double-quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

pub(super) fn write_node(dom: &Dom, node: NodeId, out: &mut String) {
    match dom.kind(node) {
        NodeKind::Text(text) => out.push_str(&escape_text(text)),
        NodeKind::Fragment => {
            for &child in dom.children(node) {
                write_node(dom, child, out);
            }
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag_name);
            for (name, value) in &element.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
                return;
            }

            for &child in dom.children(node) {
                write_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag_name);
            out.push('>');
        }
    }
}

/// Parse an HTML fragment and append the resulting nodes to `parent`.
///
/// Returns an error only for input that cannot be tokenized at all, such as
/// an unterminated tag or comment.
pub fn parse_fragment(dom: &mut Dom, parent: NodeId, html: &str) -> Result<()> {
    let mut parser = FragmentParser {
        input: html,
        pos: 0,
        open: vec![parent],
    };
    parser.run(dom)
}

struct FragmentParser<'a> {
    input: &'a str,
    pos: usize,
    open: Vec<NodeId>,
}

impl<'a> FragmentParser<'a> {
    fn current(&self) -> NodeId {
        // The fragment parent is never popped.
        self.open[self.open.len() - 1]
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn error(&self, message: &str) -> Error {
        Error::HtmlParse {
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn run(&mut self, dom: &mut Dom) -> Result<()> {
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                let end = rest
                    .find("-->")
                    .ok_or_else(|| self.error("unterminated comment"))?;
                self.pos += end + 3;
            } else if rest.starts_with("</") {
                self.end_tag(dom)?;
            } else if rest.starts_with('<')
                && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.start_tag(dom)?;
            } else if rest.starts_with("<!") {
                let end = rest
                    .find('>')
                    .ok_or_else(|| self.error("unterminated declaration"))?;
                self.pos += end + 1;
            } else {
                self.text(dom);
            }
        }
        Ok(())
    }

    fn text(&mut self, dom: &mut Dom) {
        let rest = self.rest();
        // A stray '<' that does not start a tag is literal text.
        let first = rest.chars().next().map_or(0, char::len_utf8);
        let end = rest[first..]
            .find('<')
            .map(|i| i + first)
            .unwrap_or(rest.len());
        let raw = &rest[..end];
        self.pos += end;

        let decoded = decode_entities(raw);
        let parent = self.current();
        if let Some(&last) = dom.children(parent).last() {
            if let Some(existing) = dom.text(last) {
                let merged = format!("{}{}", existing, decoded);
                dom.set_text(last, merged);
                return;
            }
        }
        let node = dom.create_text(decoded);
        dom.append_child(parent, node);
    }

    fn end_tag(&mut self, dom: &Dom) -> Result<()> {
        let rest = self.rest();
        let end = rest
            .find('>')
            .ok_or_else(|| self.error("unterminated end tag"))?;
        let name = rest[2..end].trim().to_ascii_lowercase();
        self.pos += end + 1;

        // Index 0 is the fragment parent and can't be closed.
        if let Some(index) = self
            .open
            .iter()
            .skip(1)
            .rposition(|&n| dom.tag_name(n) == Some(name.as_str()))
        {
            self.open.truncate(index + 1);
        }
        Ok(())
    }

    fn start_tag(&mut self, dom: &mut Dom) -> Result<()> {
        self.pos += 1;
        let name = self.take_while(|c| !c.is_whitespace() && c != '>' && c != '/');
        let element = dom.create_element(&name);

        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(self.error("unterminated start tag"));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                dom.append_child(self.current(), element);
                return Ok(());
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }

            let attr_name =
                self.take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/');
            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value()?
            } else {
                String::new()
            };
            if !attr_name.is_empty() {
                dom.set_attribute(element, &attr_name, decode_entities(&value));
            }
        }

        dom.append_child(self.current(), element);
        if !VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
            self.open.push(element);
        }
        Ok(())
    }

    fn attribute_value(&mut self) -> Result<String> {
        let rest = self.rest();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let end = rest[1..]
                    .find(quote)
                    .ok_or_else(|| self.error("unterminated attribute value"))?;
                let value = rest[1..end + 1].to_string();
                self.pos += end + 2;
                Ok(value)
            }
            _ => Ok(self.take_while(|c| !c.is_whitespace() && c != '>')),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}

fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';').filter(|&i| i <= 10) else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{00A0}'),
            _ if entity.starts_with("#x") || entity.starts_with("#X") => {
                u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
            }
            _ if entity.starts_with('#') => entity[1..].parse().ok().and_then(char::from_u32),
            _ => None,
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        parse_fragment(&mut dom, root, html).unwrap();
        (dom, root)
    }

    #[test]
    fn test_parse_nested_elements() {
        let (dom, root) = parse("<p class=x>Hello <b>world</b><br/>!</p>");
        assert_eq!(
            dom.inner_html(root),
            "<p class=\"x\">Hello <b>world</b><br>!</p>"
        );
    }

    #[test]
    fn test_parse_entities_and_comments() {
        let (dom, root) = parse("a&nbsp;&amp;<!-- note -->&#65;&#x42; &unknown;");
        assert_eq!(dom.text_content(root), "a\u{00A0}&AB &unknown;");
        assert_eq!(dom.children(root).len(), 1);
    }

    #[test]
    fn test_mismatched_end_tags() {
        let (dom, root) = parse("<div><span>a</div>b</em>");
        assert_eq!(dom.inner_html(root), "<div><span>a</span></div>b");
    }

    #[test]
    fn test_void_elements_without_self_closing() {
        let (dom, root) = parse("<img src=\"a.png\" alt='x'>text");
        assert_eq!(dom.inner_html(root), "<img alt=\"x\" src=\"a.png\">text");
    }

    #[test]
    fn test_quoted_attributes_and_non_ascii_text() {
        let (dom, root) = parse("é<span title=\"a b\" data-x='ü'>ß</span>ñ");
        let span = dom.children(root)[1];
        assert_eq!(dom.attribute(span, "title"), Some("a b"));
        assert_eq!(dom.attribute(span, "data-x"), Some("ü"));
        assert_eq!(dom.text_content(root), "éßñ");
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        let mut dom = Dom::new();
        let root = dom.create_element("div");
        let result = parse_fragment(&mut dom, root, "<span class=\"a");
        assert!(matches!(result, Err(Error::HtmlParse { .. })));
    }
}
