//! Parser driver
//!
//! Runs Tokenizer -> Classifier -> (optional) attribute scan -> node-ready
//! hook over one input, storing nodes as it goes.
//!
//! ```text
//! Idle --parse()--> Scanning --end of input--> Finished
//!                      |
//!                      +--hook returned false--> Aborted
//! ```
//!
//! A new `parse()` from any state clears the store and starts over.

use super::hooks::{DefaultHooks, ParseHooks};
use super::node::{Node, NodeRef};
use super::options::ParseOptions;
use super::store::NodeStore;
use crate::core::classifier::classify;
use crate::core::tokenizer::Tokenizer;
use crate::core::vocabulary::TagType;
use crate::error::HtmlError;
use std::cell::Cell;

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No parse has run yet, or the parser was cleared
    Idle,
    /// Set while the parse loop runs; a parse always returns in another state
    Scanning,
    /// The whole input was consumed
    Finished,
    /// A hook or the node cap stopped the parse early
    Aborted,
}

/// Streaming HTML parser owning the nodes of its latest parse
#[derive(Debug)]
pub struct HtmlParser {
    /// Copy of the input; every node span points into it
    source: String,
    store: NodeStore,
    state: ParserState,
    /// Attribute scans performed over the parser's lifetime
    scans: Cell<usize>,
}

impl HtmlParser {
    /// Create an idle parser
    pub fn new() -> Self {
        HtmlParser {
            source: String::new(),
            store: NodeStore::new(),
            state: ParserState::Idle,
            scans: Cell::new(0),
        }
    }

    /// Parse `html` with the default hooks
    pub fn parse(&mut self, html: &str, eager_attributes: bool) -> ParserState {
        let options = ParseOptions::new().eager_attributes(eager_attributes);
        self.parse_with_options(html, &options, DefaultHooks)
    }

    /// Parse `html` with caller hooks
    pub fn parse_with<H: ParseHooks>(&mut self, html: &str, eager_attributes: bool, hooks: H) -> ParserState {
        let options = ParseOptions::new().eager_attributes(eager_attributes);
        self.parse_with_options(html, &options, hooks)
    }

    /// Parse `html` with explicit options and caller hooks
    ///
    /// Replaces the nodes of any previous parse. Returns the final state,
    /// [`ParserState::Finished`] or [`ParserState::Aborted`].
    pub fn parse_with_options<H: ParseHooks>(
        &mut self,
        html: &str,
        options: &ParseOptions,
        mut hooks: H,
    ) -> ParserState {
        self.clear();
        self.source.push_str(html);
        self.state = ParserState::Scanning;
        log::debug!(
            "parse start: {} bytes, eager_attributes={}",
            html.len(),
            options.eager_attributes
        );

        let HtmlParser {
            source,
            store,
            state,
            scans,
        } = self;
        let source: &str = source;

        let mut tokenizer = Tokenizer::new(source.as_bytes());
        if !options.raw_text {
            tokenizer = tokenizer.without_raw_text();
        }

        while let Some(token) = tokenizer.next_token() {
            if options.max_nodes.is_some_and(|max| store.len() >= max) {
                log::trace!("node cap reached at {}", store.len());
                *state = ParserState::Aborted;
                break;
            }

            let mut node = Node::new(token, TagType::UNKNOWN);
            if token.kind.is_tag() {
                let name = token.name.as_str(source);
                let tag_type = classify(name, token.kind, |name, kind| hooks.identify_tag(name, kind));
                node = Node::new(token, tag_type);
                if options.eager_attributes || hooks.should_parse_attributes(name, tag_type) {
                    node.attributes_in(source, scans);
                }
            }

            let index = store.push(node);
            let committed = match store.get(index) {
                Some(node) => NodeRef::new(index, node, source, scans),
                None => break,
            };
            if !hooks.on_node_ready(&committed) {
                log::trace!("node-ready hook rejected node {index}");
                store.truncate(index);
                *state = ParserState::Aborted;
                break;
            }
        }

        if *state == ParserState::Scanning {
            *state = ParserState::Finished;
        }
        log::debug!("parse end: {:?}, {} nodes", state, store.len());
        *state
    }

    /// Drop all nodes and the input copy, returning to [`ParserState::Idle`]
    pub fn clear(&mut self) {
        self.store.clear();
        self.source.clear();
        self.state = ParserState::Idle;
    }

    /// Current state
    #[inline]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Number of nodes committed by the latest parse
    #[inline]
    pub fn node_count(&self) -> usize {
        self.store.len()
    }

    /// True if the latest parse committed no node
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Node at a 0-based position
    pub fn node(&self, index: usize) -> Option<NodeRef<'_>> {
        self.store
            .get(index)
            .map(|node| NodeRef::new(index, node, &self.source, &self.scans))
    }

    /// Node at a 0-based position, reporting misuse as an error
    pub fn try_node(&self, index: usize) -> Result<NodeRef<'_>, HtmlError> {
        self.node(index).ok_or(HtmlError::NodeIndex {
            index,
            count: self.store.len(),
        })
    }

    /// Nodes in document order; each call starts from the first node
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            parser: self,
            next: 0,
        }
    }

    /// The input of the latest parse
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of attribute scans run so far, eager and on demand
    #[inline]
    pub fn attribute_scans(&self) -> usize {
        self.scans.get()
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a parser's nodes
#[derive(Clone)]
pub struct Nodes<'p> {
    parser: &'p HtmlParser,
    next: usize,
}

impl<'p> Iterator for Nodes<'p> {
    type Item = NodeRef<'p>;

    fn next(&mut self) -> Option<NodeRef<'p>> {
        let node = self.parser.node(self.next)?;
        self.next += 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.parser.node_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Nodes<'_> {}

impl<'p> IntoIterator for &'p HtmlParser {
    type Item = NodeRef<'p>;
    type IntoIter = Nodes<'p>;

    fn into_iter(self) -> Nodes<'p> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::NodeFlags;
    use crate::core::vocabulary::NodeKind;
    use crate::parser::hooks::{OnNodeReady, ParseAttributesIf};
    use pretty_assertions::assert_eq;

    fn attrs(node: &NodeRef<'_>) -> Vec<(String, Option<String>)> {
        node.attributes()
            .map(|a| (a.name().to_string(), a.value().map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_link_document() {
        let mut parser = HtmlParser::new();
        assert_eq!(parser.state(), ParserState::Idle);
        assert_eq!(parser.parse("<a href=\"x\">hi</a>", true), ParserState::Finished);
        assert_eq!(parser.node_count(), 3);

        let a = parser.node(0).unwrap();
        assert_eq!(a.kind(), NodeKind::StartTag);
        assert_eq!(a.tag_name(), Some("a"));
        assert_eq!(a.tag_type(), TagType::A);
        assert_eq!(a.tag_type().code(), 101);
        assert!(a.attributes_parsed());
        assert_eq!(attrs(&a), vec![("href".to_string(), Some("x".to_string()))]);

        let text = parser.node(1).unwrap();
        assert_eq!(text.kind(), NodeKind::Content);
        assert_eq!(text.text(), "hi");
        assert_eq!(text.tag_type(), TagType::UNKNOWN);

        let end = parser.node(2).unwrap();
        assert_eq!(end.kind(), NodeKind::EndTag);
        assert_eq!(end.tag_name(), Some("a"));
        assert_eq!(end.tag_type(), TagType::A);
    }

    #[test]
    fn test_script_body_not_tokenized() {
        let mut parser = HtmlParser::new();
        parser.parse("<script>if (a<b) {}</script>", false);
        assert_eq!(parser.node_count(), 3);

        let body = parser.node(1).unwrap();
        assert_eq!(body.kind(), NodeKind::Content);
        assert!(body.is_cdata());
        assert_eq!(body.text(), "if (a<b) {}");
        assert!(parser.node(2).unwrap().is(TagType::SCRIPT));
    }

    #[test]
    fn test_self_closing_image() {
        let mut parser = HtmlParser::new();
        parser.parse("<img src=logo.png />", false);
        assert_eq!(parser.node_count(), 1);

        let img = parser.node(0).unwrap();
        assert!(img.is_self_closing());
        assert_eq!(img.flags(), NodeFlags::SELF_CLOSING);
        assert_eq!(attrs(&img), vec![("src".to_string(), Some("logo.png".to_string()))]);
    }

    #[test]
    fn test_abort_on_second_node() {
        let mut parser = HtmlParser::new();
        let mut seen = 0;
        let long = format!("<p>first</p>{}", "<b>x</b>".repeat(1000));
        let state = parser.parse_with(
            &long,
            false,
            OnNodeReady(|_: &NodeRef<'_>| {
                seen += 1;
                seen < 2
            }),
        );
        assert_eq!(state, ParserState::Aborted);
        assert_eq!(seen, 2);
        assert_eq!(parser.node_count(), 1);
        assert!(parser.node(1).is_none());
        assert_eq!(parser.node(0).and_then(|n| n.tag_name()), Some("p"));
    }

    #[test]
    fn test_node_cap() {
        let mut parser = HtmlParser::new();
        let options = ParseOptions::new().max_nodes(1);
        let state = parser.parse_with_options("<p>a</p><p>b</p>", &options, DefaultHooks);
        assert_eq!(state, ParserState::Aborted);
        assert_eq!(parser.node_count(), 1);
    }

    #[test]
    fn test_unknown_tag_is_lazy() {
        let mut parser = HtmlParser::new();
        parser.parse("<foo bar=1><div id=d></div></foo>", false);

        let foo = parser.node(0).unwrap();
        assert_eq!(foo.tag_type(), TagType::UNKNOWN);
        assert!(!foo.attributes_parsed());
        assert!(parser.node(1).unwrap().attributes_parsed());
        assert_eq!(parser.attribute_scans(), 2);

        assert_eq!(foo.attribute_value("bar"), Some("1"));
        assert!(foo.attributes_parsed());
        assert_eq!(parser.attribute_scans(), 3);
    }

    #[test]
    fn test_memoized_attributes() {
        let mut parser = HtmlParser::new();
        parser.parse("<foo a=1 b=2>", false);
        let node = parser.node(0).unwrap();

        let first: Vec<_> = node.attributes().collect();
        let scans = parser.attribute_scans();
        let second: Vec<_> = node.attributes().collect();
        node.parse_attributes();
        assert_eq!(first, second);
        assert_eq!(parser.attribute_scans(), scans);
        assert_eq!(scans, 1);
    }

    #[test]
    fn test_attribute_hook() {
        let mut parser = HtmlParser::new();
        let mut asked = Vec::new();
        parser.parse_with(
            "<a href=1><img src=2><p></p>",
            false,
            ParseAttributesIf(|name: &str, tag: TagType| {
                asked.push(name.to_string());
                tag == TagType::IMG
            }),
        );
        assert_eq!(asked, vec!["a", "img", "p", "p"]);
        assert!(!parser.node(0).unwrap().attributes_parsed());
        assert!(parser.node(1).unwrap().attributes_parsed());
    }

    #[test]
    fn test_eager_skips_attribute_hook() {
        let mut parser = HtmlParser::new();
        let mut asked = 0;
        parser.parse_with(
            "<foo x=1>",
            true,
            ParseAttributesIf(|_: &str, _: TagType| {
                asked += 1;
                false
            }),
        );
        assert_eq!(asked, 0);
        assert!(parser.node(0).unwrap().attributes_parsed());
    }

    #[test]
    fn test_custom_identification() {
        struct Widgets;
        impl ParseHooks for Widgets {
            fn identify_tag(&mut self, name: &str, _kind: NodeKind) -> TagType {
                if name == "x-card" {
                    TagType(TagType::USER.code() + 7)
                } else {
                    TagType::UNKNOWN
                }
            }
        }

        let mut parser = HtmlParser::new();
        parser.parse_with("<x-card><div></div><style>a{}</style>", false, Widgets);
        assert_eq!(parser.node(0).unwrap().tag_type(), TagType(307));
        assert_eq!(parser.node(1).unwrap().tag_type(), TagType::UNKNOWN);
        assert_eq!(parser.node(3).unwrap().tag_type(), TagType::STYLE);
        assert!(parser.node(4).unwrap().is_cdata());
    }

    #[test]
    fn test_reparse_replaces_nodes() {
        let mut parser = HtmlParser::new();
        parser.parse("<p>one</p><p>two</p>", false);
        assert_eq!(parser.node_count(), 6);

        parser.parse("<br>", false);
        assert_eq!(parser.node_count(), 1);
        assert_eq!(parser.source(), "<br>");
        assert_eq!(parser.state(), ParserState::Finished);

        parser.clear();
        assert_eq!(parser.state(), ParserState::Idle);
        assert!(parser.is_empty());
    }

    #[test]
    fn test_lossless() {
        let html = "<!DOCTYPE html>\n<html><head><title>T &amp; U</title>\
                    <style>p{}</style></head><body onload='go()'>\
                    <!-- note --><p class=x>1 < 2</p><br/><textarea><b></textarea>\
                    </body></html>\n";
        let mut parser = HtmlParser::new();
        parser.parse(html, true);
        let rebuilt: String = parser.iter().map(|n| n.raw()).collect();
        assert_eq!(rebuilt, html);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let mut parser = HtmlParser::new();
        parser.parse("<p>x</p>", false);
        let first: Vec<_> = parser.iter().map(|n| n.index()).collect();
        let second: Vec<_> = (&parser).into_iter().map(|n| n.index()).collect();
        assert_eq!(first, vec![0, 1, 2]);
        assert_eq!(first, second);
        assert_eq!(parser.iter().len(), 3);
    }

    #[test]
    fn test_try_node() {
        let mut parser = HtmlParser::new();
        parser.parse("<p>", false);
        assert!(parser.try_node(0).is_ok());
        assert_eq!(
            parser.try_node(5).unwrap_err(),
            HtmlError::NodeIndex { index: 5, count: 1 }
        );
    }

    #[test]
    fn test_unterminated_quote_is_deterministic() {
        let mut parser = HtmlParser::new();
        let mut values = Vec::new();
        for _ in 0..3 {
            parser.parse("<a href=\"x>", true);
            let a = parser.node(0).unwrap();
            assert_eq!(a.kind(), NodeKind::StartTag);
            values.push(a.attribute_value("href").map(str::to_string));
        }
        assert_eq!(values[0], Some("x".to_string()));
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_malformed_input_never_fails() {
        let mut parser = HtmlParser::new();
        for html in ["<", "</", "<!--", "<a", "a<<b", "<a b='", "</>", "<!>", "<?", "<x/"] {
            assert_eq!(parser.parse(html, true), ParserState::Finished);
            let rebuilt: String = parser.iter().map(|n| n.raw()).collect();
            assert_eq!(rebuilt, html);
        }
    }

    #[test]
    fn test_unclosable_tags_parse_as_one_text_node() {
        let html = "<a ".repeat(50_000);
        let mut parser = HtmlParser::new();
        assert_eq!(parser.parse(&html, true), ParserState::Finished);
        assert_eq!(parser.node_count(), 1);

        let text = parser.node(0).unwrap();
        assert_eq!(text.kind(), NodeKind::Content);
        assert_eq!(text.raw().len(), html.len());
        assert_eq!(parser.attribute_scans(), 0);
    }

    #[test]
    fn test_hook_sees_eager_attributes() {
        let mut parser = HtmlParser::new();
        let mut hrefs = Vec::new();
        parser.parse_with(
            "<a href=/one>1</a><a href=/two>2</a>",
            false,
            OnNodeReady(|node: &NodeRef<'_>| {
                if node.kind() == NodeKind::StartTag && node.attributes_parsed() {
                    if let Some(href) = node.attribute_value("href") {
                        hrefs.push(href.to_string());
                    }
                }
                true
            }),
        );
        assert_eq!(hrefs, vec!["/one", "/two"]);
    }
}
