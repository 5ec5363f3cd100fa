// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! An arena-allocated DOM for rendering outside the browser.
//!
//! Pages are parsed with `scraper` (html5ever underneath, so malformed markup
//! is repaired the way a browser would) and copied into a flat `Vec` of
//! nodes. Node ids are indices into that vector and stay valid for the life
//! of the document; detached nodes are simply unreachable from the root.
//!
//! Every mutation bumps `mutation_count`, which is how tests assert that a
//! code path left the page alone.

use super::Dom;
use scraper::{ElementRef, Html, Node};
use std::fmt::Write as _;

/// Handle to a node in a `MemoryDocument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Elements with no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are emitted unescaped.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable HTML document held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<NodeData>,
    mutations: usize,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty document: just the root node.
    pub fn new() -> Self {
        MemoryDocument {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            mutations: 0,
        }
    }

    /// Parse a complete HTML page.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = MemoryDocument::new();
        let root = doc.root();
        doc.import(root, parsed.root_element());
        doc
    }

    fn import(&mut self, parent: NodeId, el: ElementRef<'_>) {
        let id = self.alloc(NodeKind::Element {
            tag: el.value().name().to_string(),
            attrs: el
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });
        self.attach(parent, id);

        for child_ref in el.children() {
            match child_ref.value() {
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child_ref) {
                        self.import(id, child_el);
                    }
                }
                Node::Text(t) => {
                    let text = self.alloc(NodeKind::Text(t.text.to_string()));
                    self.attach(id, text);
                }
                Node::Comment(c) => {
                    let comment = self.alloc(NodeKind::Comment(c.comment.to_string()));
                    self.attach(id, comment);
                }
                _ => {}
            }
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The `<body>` element, if the document has one.
    pub fn body(&self) -> Option<NodeId> {
        self.elements_by_tag("body").into_iter().next()
    }

    /// Create an element and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(&parent, &id);
        id
    }

    /// Number of mutations applied since the document was created or parsed.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children only, in order.
    pub fn child_elements(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.tag(*c).is_some())
            .collect()
    }

    pub fn last_child_element(&self, id: NodeId) -> Option<NodeId> {
        self.child_elements(id).last().copied()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(_) => {}
            _ => {
                for child in &self.nodes[id.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Value of one inline style property, e.g. `style_property(h, "display")`.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attribute(id, "style")?;
        parse_style(style)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Connected elements with this tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(self.root(), &mut |id: NodeId| {
            if self.tag(id) == Some(tag) {
                found.push(id);
            }
            false
        });
        found
    }

    /// Depth-first pre-order walk from `id`. Stops when `visit` returns true.
    fn walk(&self, id: NodeId, visit: &mut dyn FnMut(NodeId) -> bool) -> bool {
        if visit(id) {
            return true;
        }
        for child in &self.nodes[id.0].children {
            if self.walk(*child, visit) {
                return true;
            }
        }
        false
    }

    /// Serialize the whole document.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.tag_of_first_element() == Some("html") {
            out.push_str("<!DOCTYPE html>");
        }
        for child in self.children(self.root()) {
            self.write_node(*child, &mut out);
        }
        out
    }

    /// Serialize one node including its own tag.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize a node's children.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn tag_of_first_element(&self) -> Option<&str> {
        self.child_elements(self.root())
            .first()
            .and_then(|id| self.tag(*id))
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Document => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
            }
            NodeKind::Text(text) => {
                let raw = node
                    .parent
                    .and_then(|p| self.tag(p))
                    .is_some_and(|t| RAW_TEXT_ELEMENTS.contains(&t));
                if raw {
                    out.push_str(text);
                } else {
                    escape_text(text, out);
                }
            }
            NodeKind::Comment(comment) => {
                let _ = write!(out, "<!--{}-->", comment);
            }
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &node.children {
                    self.write_node(*child, out);
                }
                let _ = write!(out, "</{}>", tag);
            }
        }
    }
}

impl Dom for MemoryDocument {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut found = None;
        self.walk(self.root(), &mut |node: NodeId| {
            if self.attribute(node, "id") == Some(id) {
                found = Some(node);
                true
            } else {
                false
            }
        });
        found
    }

    fn parent_element(&self, element: &NodeId) -> Option<NodeId> {
        self.parent(*element).filter(|p| self.tag(*p).is_some())
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.mutations += 1;
        self.alloc(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        })
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        self.mutations += 1;
        let old = std::mem::take(&mut self.nodes[element.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let node = self.alloc(NodeKind::Text(text.to_string()));
            self.attach(*element, node);
        }
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        self.mutations += 1;
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[element.0].kind {
            match attrs.iter_mut().find(|(n, _)| n == name) {
                Some((_, v)) => *v = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn set_style(&mut self, element: &NodeId, property: &str, value: &str) {
        let mut declarations = self
            .attribute(*element, "style")
            .map(parse_style)
            .unwrap_or_default();
        match declarations.iter_mut().find(|(name, _)| name == property) {
            Some((_, v)) => *v = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }
        let style = declarations
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(element, "style", &style);
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.mutations += 1;
        self.attach(*parent, *child);
    }
}

/// Split an inline style into (property, value) pairs.
fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, value.trim().to_string()))
        })
        .collect()
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
