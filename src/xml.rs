//! Minimal XML tree used to assemble feed documents.
//!
//! The builders only need four operations: create an element, append a text
//! node, append a child element and set an attribute. Serialization is
//! delegated to `quick-xml`'s [`Writer`], which handles escaping of text and
//! attribute values and optional indentation.

use std::io::{self, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// A node inside an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element holding a single text node.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.append_text(text);
        element
    }

    /// Sets an attribute, replacing the value if the attribute already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Returns the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// Concatenated direct text content of this element.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Replaces the first child element sharing `child`'s name, or appends it.
    pub(crate) fn replace_child(&mut self, child: Element) {
        let existing = self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) if element.name == child.name => Some(element),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = child,
            None => self.append_child(child),
        }
    }

    /// Stable-sorts child elements by a rank derived from their name.
    /// Text nodes sort last.
    pub(crate) fn sort_children_by_rank(&mut self, rank: impl Fn(&str) -> usize) {
        self.children.sort_by_key(|node| match node {
            Node::Element(element) => rank(&element.name),
            Node::Text(_) => usize::MAX,
        });
    }

    pub(crate) fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start));
        }

        writer.write_event(Event::Start(start))?;
        for node in &self.children {
            match node {
                Node::Element(element) => element.write_to(writer)?,
                Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            }
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))
    }
}

/// Creates a writer over `sink`, indenting by `indent` spaces per level when
/// `indent > 0` and producing compact output otherwise.
pub(crate) fn writer<W: Write>(sink: W, indent: usize) -> Writer<W> {
    if indent > 0 {
        Writer::new_with_indent(sink, b' ', indent)
    } else {
        Writer::new(sink)
    }
}

pub(crate) fn write_declaration<W: Write>(writer: &mut Writer<W>) -> io::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
}

pub(crate) fn write_start<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> io::Result<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))
}

pub(crate) fn write_end<W: Write>(writer: &mut Writer<W>, name: &str) -> io::Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(element: &Element, indent: usize) -> String {
        let mut out = Vec::new();
        element.write_to(&mut writer(&mut out, indent)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_childless_element_is_self_closing() {
        let mut enclosure = Element::new("enclosure");
        enclosure.set_attribute("url", "https://example.org/a.mp3");
        enclosure.set_attribute("length", "42");
        assert_eq!(
            render(&enclosure, 0),
            r#"<enclosure url="https://example.org/a.mp3" length="42"/>"#
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let mut category = Element::with_text("category", "a < b & c");
        category.set_attribute("domain", "https://example.org/?x=1&y=\"2\"");
        let out = render(&category, 0);
        assert!(out.contains("a &lt; b &amp; c"), "{out}");
        assert!(out.contains("x=1&amp;y=&quot;2&quot;"), "{out}");
    }

    #[test]
    fn test_set_attribute_replaces_existing() {
        let mut guid = Element::with_text("guid", "x");
        guid.set_attribute("isPermaLink", "false");
        guid.set_attribute("isPermaLink", "true");
        assert_eq!(guid.attributes().len(), 1);
        assert_eq!(guid.attribute("isPermaLink"), Some("true"));
    }

    #[test]
    fn test_replace_child_keeps_position() {
        let mut parent = Element::new("channel");
        parent.append_child(Element::with_text("title", "old"));
        parent.append_child(Element::with_text("link", "https://example.org/"));
        parent.replace_child(Element::with_text("title", "new"));

        let names: Vec<_> = parent.elements().map(Element::name).collect();
        assert_eq!(names, ["title", "link"]);
        assert_eq!(parent.child("title").map(Element::text).as_deref(), Some("new"));
    }

    #[test]
    fn test_sort_is_stable_within_rank() {
        let mut parent = Element::new("channel");
        parent.append_child(Element::with_text("category", "b"));
        parent.append_child(Element::with_text("title", "t"));
        parent.append_child(Element::with_text("category", "a"));
        parent.sort_children_by_rank(|name| if name == "title" { 0 } else { 1 });

        let texts: Vec<_> = parent.elements().map(Element::text).collect();
        assert_eq!(texts, ["t", "b", "a"]);
    }

    #[test]
    fn test_indented_output_keeps_text_inline() {
        let mut image = Element::new("image");
        image.append_child(Element::with_text("width", "88"));
        image.append_child(Element::with_text("height", "31"));
        assert_eq!(
            render(&image, 2),
            "<image>\n  <width>88</width>\n  <height>31</height>\n</image>"
        );
    }

    #[test]
    fn test_compact_output_has_no_whitespace() {
        let mut image = Element::new("image");
        image.append_child(Element::with_text("width", "88"));
        assert_eq!(render(&image, 0), "<image><width>88</width></image>");
    }
}
