//! Document tree and element types.

use std::fmt;

use super::parse::parse_fragment;
use super::selector::{Selector, SelectorError};
use super::serialize;

/// Handle to a node in a [`Document`].
///
/// Handles stay valid for the lifetime of the document. Removing a node
/// detaches it from the tree but keeps its slot, so a handle held by a
/// pending timer never dangles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// An HTML element.
///
/// Attributes keep their source order so serialization is stable. `value`
/// and `checked` are the live form-control state, initialised from the
/// attributes of the same name and diverging from them afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    value: String,
    checked: bool,
}

impl Element {
    /// Create an element with no attributes. The tag is lowercased.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            value: String::new(),
            checked: false,
        }
    }

    /// Create an element from a tag and attribute list.
    ///
    /// Attribute names are lowercased; later duplicates are dropped.
    pub fn with_attrs<I, K, V>(tag: &str, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut element = Self::new(tag);
        for (name, value) in attrs {
            let name = name.as_ref().to_ascii_lowercase();
            if element.has_attr(&name) {
                continue;
            }
            element.attrs.push((name, value.into()));
        }
        element.value = element.attr("value").unwrap_or_default().to_string();
        element.checked = element.has_attr("checked");
        element
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _)| n != name);
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let kept: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = kept.join(" ");
        self.set_attr("class", joined);
    }

    /// Flip a class. Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Current form-control value.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub(crate) fn set_checked_flag(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// `disabled` reflects the attribute, as in HTML.
    pub fn disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.set_attr("disabled", "");
        } else {
            self.remove_attr("disabled");
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.attr("placeholder")
    }

    /// Look up an inline style property from the `style` attribute.
    pub fn style_property(&self, name: &str) -> Option<String> {
        parse_style(self.attr("style").unwrap_or_default())
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Set an inline style property, rewriting the `style` attribute.
    pub fn set_style_property(&mut self, name: &str, value: &str) {
        let mut decls = parse_style(self.attr("style").unwrap_or_default());
        match decls.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => decls.push((name.to_string(), value.to_string())),
        }
        let css = decls
            .iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr("style", css);
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.trim().to_string()))
        })
        .collect()
}

/// Iterator over a node and its ancestors, innermost first.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// An arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            root: NodeId(0),
        }
    }

    /// Build a document from HTML source.
    ///
    /// The parser is lenient: unknown constructs are skipped, unclosed
    /// elements are closed at end of input and stray end tags are ignored.
    pub fn parse(html: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root;
        parse_fragment(&mut doc, root, html);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<body>` element, if the page has one.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.tag() == "body"))
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.0).map(|n| &n.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.nodes.get(id.0).map(|n| &n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Add a detached element to the arena.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeKind::Element(element))
    }

    /// Add a detached text node to the arena.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first. Ids from another document are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let known = |id: NodeId| id.0 < self.nodes.len();
        if !known(parent) || !known(child) || parent == child || self.contains(child, parent) {
            return;
        }
        self.remove(child);
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Detach a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
    }

    /// Whether the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.ancestors(id).last() == Some(self.root)
    }

    /// Inclusive containment, as `Node.contains`.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// The node itself followed by its ancestors.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.nodes.get(id.0).map(|_| id),
        }
    }

    /// All descendants of `id` in tree order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// First connected element with the given id, in tree order.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&n| self.element(n).and_then(Element::id) == Some(id))
    }

    /// Whether an element node matches a parsed selector.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// First connected element matching `selector`.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    /// All connected elements matching `selector`, in tree order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_within(self.root, &selector))
    }

    /// Descendants of `scope` matching `selector`, in tree order.
    pub fn query_within(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_within(scope, &selector))
    }

    pub fn select_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }

    /// Nearest inclusive ancestor matching `selector`, as `Element.closest`.
    pub fn closest(&self, id: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.ancestors(id).find(|&a| selector.matches(self, a)))
    }

    /// Concatenated text of the node's subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(NodeKind::Text(text)) = self.kind(id) {
            out.push_str(text);
        }
        for node in self.descendants(id) {
            if let Some(NodeKind::Text(text)) = self.kind(node) {
                out.push_str(text);
            }
        }
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        serialize::inner_html(self, id)
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        serialize::outer_html(self, id)
    }

    /// Replace the children of `id` with nodes parsed from `html`.
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) {
        if id.0 >= self.nodes.len() {
            return;
        }
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
        parse_fragment(self, id, html);
    }

    /// Parse `html` and append the result to `parent`. Returns the new
    /// top-level nodes.
    pub fn append_html(&mut self, parent: NodeId, html: &str) -> Vec<NodeId> {
        if parent.0 >= self.nodes.len() {
            return Vec::new();
        }
        parse_fragment(self, parent, html)
    }

    /// Check or uncheck a control. Checking a radio unchecks the other
    /// radios sharing its `name` within the same form (or document).
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        let group = self.radio_group_peers(id);
        if let Some(element) = self.element_mut(id) {
            element.set_checked_flag(checked);
        }
        if checked {
            for peer in group {
                if let Some(element) = self.element_mut(peer) {
                    element.set_checked_flag(false);
                }
            }
        }
    }

    fn radio_group_peers(&self, id: NodeId) -> Vec<NodeId> {
        let Some(element) = self.element(id) else {
            return Vec::new();
        };
        if element.attr("type") != Some("radio") {
            return Vec::new();
        }
        let Some(name) = element.attr("name") else {
            return Vec::new();
        };
        let form = self
            .ancestors(id)
            .find(|&a| self.element(a).is_some_and(|e| e.tag() == "form"));
        let scope = form.unwrap_or(self.root);
        self.descendants(scope)
            .into_iter()
            .filter(|&n| n != id)
            .filter(|&n| {
                self.element(n).is_some_and(|e| {
                    e.tag() == "input" && e.attr("type") == Some("radio") && e.attr("name") == Some(name)
                })
            })
            .collect()
    }

    /// Give `<select>` elements their initial value: the `selected` option,
    /// else the first option.
    pub(crate) fn init_select(&mut self, id: NodeId) {
        let options: Vec<NodeId> = self
            .descendants(id)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| e.tag() == "option"))
            .collect();
        let chosen = options
            .iter()
            .copied()
            .find(|&o| self.element(o).is_some_and(|e| e.has_attr("selected")))
            .or_else(|| options.first().copied());
        let value = match chosen {
            Some(option) => match self.element(option).and_then(|e| e.attr("value")) {
                Some(v) => v.to_string(),
                None => self.text_content(option).trim().to_string(),
            },
            None => String::new(),
        };
        if let Some(select) = self.element_mut(id) {
            select.set_value(value);
        }
    }
}
