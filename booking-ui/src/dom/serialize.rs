//! HTML serialization for `innerHTML`/`outerHTML`.

use super::document::{Document, NodeId, NodeKind};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(crate) fn inner_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    let raw = doc
        .element(id)
        .is_some_and(|e| matches!(e.tag(), "script" | "style"));
    for &child in doc.children(id) {
        write_node(doc, child, raw, &mut out);
    }
    out
}

pub(crate) fn outer_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, false, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, raw_text: bool, out: &mut String) {
    match doc.kind(id) {
        Some(NodeKind::Text(text)) if raw_text => out.push_str(text),
        Some(NodeKind::Text(text)) => escape_text(text, out),
        Some(NodeKind::Element(element)) => {
            out.push('<');
            out.push_str(element.tag());
            for (name, value) in element.attrs() {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&element.tag()) {
                return;
            }
            out.push_str(&inner_html(doc, id));
            out.push_str("</");
            out.push_str(element.tag());
            out.push('>');
        }
        Some(NodeKind::Document) => out.push_str(&inner_html(doc, id)),
        None => {}
    }
}

fn escape_text(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::Document;

    #[test]
    fn serializes_elements_and_escapes_text() {
        let doc = Document::parse(r#"<p id="p" title="a &quot;b&quot;">x &lt; y<br></p>"#);
        let p = doc.get_element_by_id("p").unwrap();
        assert_eq!(
            doc.outer_html(p),
            r#"<p id="p" title="a &quot;b&quot;">x &lt; y<br></p>"#
        );
        assert_eq!(doc.inner_html(p), "x &lt; y<br>");
    }

    #[test]
    fn inner_html_round_trips_through_set_inner_html() {
        let mut doc = Document::parse(r#"<button id="b" type="submit">Search <b>now</b></button>"#);
        let b = doc.get_element_by_id("b").unwrap();
        let original = doc.inner_html(b);
        doc.set_inner_html(b, r#"<i class="bi bi-hourglass-split"></i> Searching..."#);
        assert_eq!(doc.text_content(b), " Searching...");
        doc.set_inner_html(b, &original);
        assert_eq!(doc.inner_html(b), "Search <b>now</b>");
    }
}
