//! Node representation
//!
//! A [`Node`] only holds spans into the parser's copy of the input. Callers
//! see nodes through [`NodeRef`], which pairs a node with that input and
//! borrows the parser, so no view can outlive the parse that produced it.

use crate::core::attributes::{parse_attributes, Attribute};
use crate::core::entities::decode_text;
use crate::core::span::Span;
use crate::core::tokenizer::{NodeFlags, Token};
use crate::core::vocabulary::{NodeKind, TagType};
use crate::error::HtmlError;
use std::borrow::Cow;
use std::cell::{Cell, OnceCell};
use std::fmt;

/// A finalized node in the store
#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    span: Span,
    name: Span,
    inner: Span,
    tag_type: TagType,
    flags: NodeFlags,
    /// Unparsed until first requested, then cached
    attributes: OnceCell<Box<[Attribute]>>,
}

impl Node {
    /// Build a node from a token and the tag type it was classified as
    pub(crate) fn new(token: Token, tag_type: TagType) -> Self {
        Node {
            kind: token.kind,
            span: token.span,
            name: token.name,
            inner: token.inner,
            tag_type,
            flags: token.flags,
            attributes: OnceCell::new(),
        }
    }

    /// Parse the attribute list once; later calls return the cached list
    pub(crate) fn attributes_in<'n>(&'n self, source: &str, scans: &Cell<usize>) -> &'n [Attribute] {
        if !self.kind.is_tag() {
            return &[];
        }
        self.attributes.get_or_init(|| {
            scans.set(scans.get() + 1);
            parse_attributes(source.as_bytes(), self.inner).into_boxed_slice()
        })
    }

    /// Node kind
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Tag type; [`TagType::UNKNOWN`] for non-tag nodes
    #[inline]
    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Flag bits
    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// Source span of the whole node
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Whether the attribute list has been parsed
    #[inline]
    pub fn attributes_parsed(&self) -> bool {
        self.attributes.get().is_some()
    }
}

/// Borrowed view of a node inside a parser
#[derive(Clone, Copy)]
pub struct NodeRef<'p> {
    index: usize,
    node: &'p Node,
    source: &'p str,
    scans: &'p Cell<usize>,
}

impl<'p> NodeRef<'p> {
    pub(crate) fn new(index: usize, node: &'p Node, source: &'p str, scans: &'p Cell<usize>) -> Self {
        NodeRef {
            index,
            node,
            source,
            scans,
        }
    }

    /// 0-based position in document order
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Node kind
    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    /// Tag type; [`TagType::UNKNOWN`] for non-tag nodes
    #[inline]
    pub fn tag_type(&self) -> TagType {
        self.node.tag_type
    }

    /// Flag bits
    #[inline]
    pub fn flags(&self) -> NodeFlags {
        self.node.flags
    }

    /// Start tag written as `<tag/>`
    #[inline]
    pub fn is_self_closing(&self) -> bool {
        self.node.flags.contains(NodeFlags::SELF_CLOSING)
    }

    /// Raw-text body of SCRIPT, STYLE or TEXTAREA
    #[inline]
    pub fn is_cdata(&self) -> bool {
        self.node.flags.contains(NodeFlags::CDATA_BLOCK)
    }

    /// The exact source text of the node, delimiters included
    #[inline]
    pub fn raw(&self) -> &'p str {
        self.node.span.as_str(self.source)
    }

    /// Source span of the whole node
    #[inline]
    pub fn span(&self) -> Span {
        self.node.span
    }

    /// The node's text
    ///
    /// Content: the text itself. Remarks: the comment body. Tags: everything
    /// between the name and `>` (or `/>`). Unknown: the declaration body.
    #[inline]
    pub fn text(&self) -> &'p str {
        self.node.inner.as_str(self.source)
    }

    /// [`NodeRef::text`] with character references decoded
    pub fn decoded_text(&self) -> Cow<'p, str> {
        decode_text(self.text())
    }

    /// Tag name as written, for start and end tags
    #[inline]
    pub fn tag_name(&self) -> Option<&'p str> {
        self.node
            .kind
            .is_tag()
            .then(|| self.node.name.as_str(self.source))
    }

    /// Whether this is a start or end tag of `tag`
    #[inline]
    pub fn is(&self, tag: TagType) -> bool {
        self.node.kind.is_tag() && self.node.tag_type == tag
    }

    /// Whether the attribute list has been parsed, eagerly or on demand
    #[inline]
    pub fn attributes_parsed(&self) -> bool {
        self.node.attributes_parsed()
    }

    /// Parse the attribute list if that has not happened yet
    ///
    /// Repeated calls do not scan again.
    pub fn parse_attributes(&self) -> &'p [Attribute] {
        self.node.attributes_in(self.source, self.scans)
    }

    /// Number of attributes, parsing them on first use
    pub fn attribute_count(&self) -> usize {
        self.parse_attributes().len()
    }

    /// Attributes in source order, parsing them on first use
    pub fn attributes(&self) -> Attributes<'p> {
        Attributes {
            inner: self.parse_attributes().iter(),
            source: self.source,
        }
    }

    /// First attribute named exactly `name` (case-sensitive)
    pub fn attribute(&self, name: &str) -> Option<AttributeRef<'p>> {
        self.attributes().find(|attr| attr.name == name)
    }

    /// First attribute whose name equals `name` ignoring ASCII case
    pub fn attribute_ignore_case(&self, name: &str) -> Option<AttributeRef<'p>> {
        self.attributes()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// Value of the first attribute named exactly `name`
    ///
    /// A boolean attribute reads as the empty string.
    pub fn attribute_value(&self, name: &str) -> Option<&'p str> {
        self.attribute(name).map(|attr| attr.value_or_empty())
    }

    /// Attribute at a 0-based position
    pub fn attribute_at(&self, index: usize) -> Option<AttributeRef<'p>> {
        self.parse_attributes()
            .get(index)
            .map(|attr| AttributeRef::new(attr, self.source))
    }

    /// Attribute at a 0-based position, reporting misuse as an error
    pub fn try_attribute_at(&self, index: usize) -> Result<AttributeRef<'p>, HtmlError> {
        self.attribute_at(index).ok_or(HtmlError::AttributeIndex {
            index,
            count: self.attribute_count(),
        })
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("kind", &self.node.kind)
            .field("tag_type", &self.node.tag_type)
            .field("raw", &self.raw())
            .finish()
    }
}

/// Borrowed attribute: name and optional value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRef<'p> {
    name: &'p str,
    value: Option<&'p str>,
}

impl<'p> AttributeRef<'p> {
    fn new(attr: &Attribute, source: &'p str) -> Self {
        AttributeRef {
            name: attr.name.as_str(source),
            value: attr.value.map(|v| v.as_str(source)),
        }
    }

    /// Name as written
    #[inline]
    pub fn name(&self) -> &'p str {
        self.name
    }

    /// Value without quotes; None for boolean attributes
    #[inline]
    pub fn value(&self) -> Option<&'p str> {
        self.value
    }

    /// Value, with boolean attributes reading as ""
    #[inline]
    pub fn value_or_empty(&self) -> &'p str {
        self.value.unwrap_or("")
    }

    /// Value with character references decoded
    pub fn decoded_value(&self) -> Option<Cow<'p, str>> {
        self.value.map(decode_text)
    }
}

/// Iterator over a node's attributes
#[derive(Clone)]
pub struct Attributes<'p> {
    inner: std::slice::Iter<'p, Attribute>,
    source: &'p str,
}

impl<'p> Iterator for Attributes<'p> {
    type Item = AttributeRef<'p>;

    fn next(&mut self) -> Option<AttributeRef<'p>> {
        self.inner.next().map(|attr| AttributeRef::new(attr, self.source))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Attributes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::Tokenizer;

    fn first_node(input: &str) -> Node {
        let token = Tokenizer::new(input.as_bytes()).next().unwrap();
        Node::new(token, TagType::UNKNOWN)
    }

    #[test]
    fn test_lazy_parse_is_memoized() {
        let input = "<a href=x title='t'>";
        let node = first_node(input);
        let scans = Cell::new(0);
        let view = NodeRef::new(0, &node, input, &scans);

        assert!(!view.attributes_parsed());
        assert_eq!(view.attribute_value("href"), Some("x"));
        assert!(view.attributes_parsed());
        assert_eq!(view.attribute_count(), 2);
        assert_eq!(view.attribute_at(1).map(|a| a.name()), Some("title"));
        assert_eq!(scans.get(), 1);
    }

    #[test]
    fn test_non_tag_nodes_have_no_attributes() {
        let input = "plain text";
        let node = first_node(input);
        let scans = Cell::new(0);
        let view = NodeRef::new(0, &node, input, &scans);

        assert_eq!(view.attribute_count(), 0);
        assert_eq!(view.tag_name(), None);
        assert_eq!(scans.get(), 0);
    }

    #[test]
    fn test_attribute_lookup_policies() {
        let input = "<input Type=text disabled>";
        let node = first_node(input);
        let scans = Cell::new(0);
        let view = NodeRef::new(0, &node, input, &scans);

        assert!(view.attribute("type").is_none());
        assert_eq!(view.attribute("Type").and_then(|a| a.value()), Some("text"));
        assert_eq!(
            view.attribute_ignore_case("TYPE").map(|a| a.value_or_empty()),
            Some("text")
        );
        assert_eq!(view.attribute("disabled").map(|a| a.value()), Some(None));
        assert_eq!(view.attribute_value("disabled"), Some(""));
    }

    #[test]
    fn test_try_attribute_at_out_of_range() {
        let input = "<p class=x>";
        let node = first_node(input);
        let scans = Cell::new(0);
        let view = NodeRef::new(0, &node, input, &scans);

        assert_eq!(
            view.try_attribute_at(3),
            Err(HtmlError::AttributeIndex { index: 3, count: 1 })
        );
    }

    #[test]
    fn test_decoded_values() {
        let input = "<a title=\"Tom &amp; Jerry\">";
        let node = first_node(input);
        let scans = Cell::new(0);
        let view = NodeRef::new(0, &node, input, &scans);

        let title = view.attribute("title").unwrap();
        assert_eq!(title.value(), Some("Tom &amp; Jerry"));
        assert_eq!(title.decoded_value().as_deref(), Some("Tom & Jerry"));
    }
}
