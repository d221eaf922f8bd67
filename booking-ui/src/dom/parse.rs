//! Lenient HTML fragment parser.
//!
//! Handles the subset of HTML the site's templates use: elements with
//! quoted or bare attributes, void elements, comments, doctype, raw-text
//! `<script>`/`<style>` bodies and the common character references. There
//! is no implied-end-tag logic; an end tag closes the nearest open element
//! with the same name and a stray end tag is ignored.

use super::document::{Document, Element, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consume through the next occurrence of `pat`, returning the text
    /// before it. Consumes everything if `pat` never occurs.
    fn take_through(&mut self, pat: &str) -> &'a str {
        let rest = self.rest();
        match rest.find(pat) {
            Some(idx) => {
                self.pos += idx + pat.len();
                &rest[..idx]
            }
            None => {
                self.pos = self.src.len();
                rest
            }
        }
    }

    /// Like [`Cursor::take_through`], but matches ASCII letters in `pat`
    /// regardless of case.
    fn take_through_ignore_case(&mut self, pat: &str) -> &'a str {
        let rest = self.rest();
        // ASCII lowercasing keeps byte offsets, so an index into the copy
        // is an index into `rest`.
        let folded = rest.to_ascii_lowercase();
        match folded.find(&pat.to_ascii_lowercase()) {
            Some(idx) => {
                self.pos += idx + pat.len();
                &rest[..idx]
            }
            None => {
                self.pos = self.src.len();
                rest
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }
}

/// Parse `html` and append the resulting nodes to `parent`.
///
/// Returns the nodes created directly under `parent`.
pub(crate) fn parse_fragment(doc: &mut Document, parent: NodeId, html: &str) -> Vec<NodeId> {
    let mut cursor = Cursor { src: html, pos: 0 };
    let mut stack = vec![parent];
    let mut top_level = Vec::new();
    let mut selects = Vec::new();

    while !cursor.at_end() {
        let rest = cursor.rest();

        if rest.starts_with("<!--") {
            cursor.pos += 4;
            cursor.take_through("-->");
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            cursor.take_through(">");
            continue;
        }
        if rest.starts_with("</") {
            cursor.pos += 2;
            let name = cursor.take_through(">").trim().to_ascii_lowercase();
            let open = stack
                .iter()
                .enumerate()
                .skip(1)
                .rev()
                .find(|&(_, &n)| doc.element(n).is_some_and(|e| e.tag() == name))
                .map(|(idx, _)| idx);
            if let Some(idx) = open {
                stack.truncate(idx);
            }
            continue;
        }
        if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            cursor.pos += 1;
            let (element, self_closing) = parse_start_tag(&mut cursor);
            let tag = element.tag().to_string();
            let id = doc.create_element(element);
            let current = stack.last().copied().unwrap_or(parent);
            doc.append_child(current, id);
            if stack.len() == 1 {
                top_level.push(id);
            }
            if tag == "select" {
                selects.push(id);
            }

            if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                let body = cursor.take_through_ignore_case(&format!("</{tag}"));
                cursor.take_through(">");
                if !body.is_empty() {
                    let text = doc.create_text(body);
                    doc.append_child(id, text);
                }
            } else if !self_closing && !VOID_ELEMENTS.contains(&tag.as_str()) {
                stack.push(id);
            }
            continue;
        }

        // Text runs to the next '<' (a lone '<' that starts no tag is text).
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '<')
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let text = decode_entities(&rest[..end]);
        cursor.pos += end;
        let node = doc.create_text(text);
        let current = stack.last().copied().unwrap_or(parent);
        doc.append_child(current, node);
        if stack.len() == 1 {
            top_level.push(node);
        }
    }

    for select in selects {
        doc.init_select(select);
    }
    top_level
}

/// Parse a start tag; the cursor is just past the `<`.
fn parse_start_tag(cursor: &mut Cursor<'_>) -> (Element, bool) {
    let name = cursor.take_while(|c| !c.is_whitespace() && c != '>' && c != '/');
    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;

    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            None => break,
            Some('>') => {
                cursor.bump();
                break;
            }
            Some('/') => {
                cursor.bump();
                if cursor.peek() == Some('>') {
                    cursor.bump();
                    self_closing = true;
                    break;
                }
                continue;
            }
            Some(_) => {}
        }

        let attr_name =
            cursor.take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/');
        if attr_name.is_empty() {
            cursor.bump();
            continue;
        }
        cursor.skip_whitespace();
        let value = if cursor.peek() == Some('=') {
            cursor.bump();
            cursor.skip_whitespace();
            match cursor.peek() {
                Some(quote @ ('"' | '\'')) => {
                    cursor.bump();
                    let raw = cursor.take_through(&quote.to_string());
                    decode_entities(raw)
                }
                _ => decode_entities(cursor.take_while(|c| !c.is_whitespace() && c != '>')),
            }
        } else {
            String::new()
        };
        attrs.push((attr_name.to_string(), value));
    }

    (Element::with_attrs(name, attrs), self_closing)
}

/// Decode the character references that show up in templates.
pub(crate) fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
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
