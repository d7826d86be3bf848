//! In-memory document tree
//!
//! Pages are built as element trees and mutated by the renderers (shop slots,
//! crop containers, translation passes) before being serialized to HTML.
//! Serialization goes through [`maud::Render`], so every text node and attribute
//! value is escaped on output.

use maud::{
    DOCTYPE,
    Markup,
    Render,
    html,
};

/// Attribute holding the translation key of an element.
pub const TRANSLATION_KEY_ATTR: &str = "data-lang";
/// Marker attribute: only the first text child is relabeled.
pub const TEXT_ONLY_ATTR: &str = "data-lang-text-only";

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Text, escaped on output.
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// An HTML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    tag: String,
    /// Attributes in insertion order.
    attrs: Vec<(String, String)>,
    /// Child nodes.
    children: Vec<Node>,
}

impl Element {
    /// Empty `<tag>` element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), attrs: Vec::new(), children: Vec::new() }
    }

    /// Sets attribute `name`.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Sets the `class` attribute.
    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Tags the element with a translation key.
    #[must_use]
    pub fn key(self, key: &str) -> Self {
        self.attr(TRANSLATION_KEY_ATTR, key)
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Appends every node of `nodes`.
    #[must_use]
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Whether attribute `name` is set.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Sets attribute `name`, replacing any previous value.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    /// Whether `class` is one of the element's classes.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Direct children.
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children = vec![Node::Text(text.into())];
    }

    /// Replaces all children.
    pub fn set_children(&mut self, nodes: Vec<Node>) {
        self.children = nodes;
    }

    /// The first direct text child, if any.
    pub fn first_text_mut(&mut self) -> Option<&mut String> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        })
    }

    /// Concatenated text of this element and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    /// Appends the text of every descendant to `out`.
    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Visits this element and every descendant element in document order.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Self)) {
        f(self);
        for node in &mut self.children {
            if let Node::Element(element) = node {
                element.visit_mut(f);
            }
        }
    }

    /// First element in document order matching `pred`.
    #[must_use]
    pub fn find(&self, pred: &dyn Fn(&Self) -> bool) -> Option<&Self> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|node| match node {
            Node::Element(element) => element.find(pred),
            Node::Text(_) => None,
        })
    }

    /// Mutable [`Self::find`].
    pub fn find_mut(&mut self, pred: &dyn Fn(&Self) -> bool) -> Option<&mut Self> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) => element.find_mut(pred),
            Node::Text(_) => None,
        })
    }

    /// All elements in document order matching `pred`.
    #[must_use]
    pub fn find_all(&self, pred: &dyn Fn(&Self) -> bool) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect_matching(pred, &mut found);
        found
    }

    /// Pushes every match of `pred` in document order.
    fn collect_matching<'a>(&'a self, pred: &dyn Fn(&Self) -> bool, found: &mut Vec<&'a Self>) {
        if pred(self) {
            found.push(self);
        }
        for node in &self.children {
            if let Node::Element(element) = node {
                element.collect_matching(pred, found);
            }
        }
    }
}

impl Render for Node {
    fn render_to(&self, buffer: &mut String) {
        match self {
            Self::Element(element) => element.render_to(buffer),
            Self::Text(text) => text.render_to(buffer),
        }
    }
}

impl Render for Element {
    fn render_to(&self, buffer: &mut String) {
        buffer.push('<');
        buffer.push_str(&self.tag);
        for (name, value) in &self.attrs {
            buffer.push(' ');
            buffer.push_str(name);
            buffer.push_str("=\"");
            value.render_to(buffer);
            buffer.push('"');
        }
        buffer.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for node in &self.children {
            node.render_to(buffer);
        }
        buffer.push_str("</");
        buffer.push_str(&self.tag);
        buffer.push('>');
    }
}

/// A whole page: title, document language and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Text of `<title>`.
    pub title: String,
    /// BCP 47 code written to `<html lang>`.
    pub lang: String,
    /// Linked stylesheet, if any.
    pub stylesheet: Option<String>,
    /// The `<body>` element.
    pub body: Element,
}

impl Document {
    /// Marathi document with no stylesheet.
    #[must_use]
    pub fn new(title: impl Into<String>, body: Element) -> Self {
        Self { title: title.into(), lang: "mr".to_string(), stylesheet: None, body }
    }

    /// First element whose `id` is `id`.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.body.find(&|e| e.get_attr("id") == Some(id))
    }

    /// Mutable [`Self::by_id`].
    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_mut(&|e| e.get_attr("id") == Some(id))
    }

    /// First element with class `class`.
    #[must_use]
    pub fn by_class(&self, class: &str) -> Option<&Element> {
        self.body.find(&|e| e.has_class(class))
    }

    /// Mutable [`Self::by_class`].
    pub fn by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.body.find_mut(&|e| e.has_class(class))
    }

    /// Elements carrying a translation key, in document order.
    #[must_use]
    pub fn translatable(&self) -> Vec<&Element> {
        self.body.find_all(&|e| e.has_attr(TRANSLATION_KEY_ATTR))
    }

    /// The full page, escaped.
    #[must_use]
    pub fn to_markup(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang=(self.lang) {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.title) }
                    @if let Some(href) = &self.stylesheet {
                        link rel="stylesheet" href=(href);
                    }
                }
                (self.body)
            }
        }
    }

    /// [`Self::to_markup`] as a string.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.to_markup().into_string()
    }
}
