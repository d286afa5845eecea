//! Parallel document parsing
//!
//! Uses Rayon to parse many documents at once, one parser per document.

use crate::core::vocabulary::{NodeKind, TagType};
use crate::parser::{DefaultHooks, HtmlParser, ParseOptions};
use rayon::prelude::*;

/// Parse each input with its own parser, preserving input order
pub fn parse_parallel(inputs: &[&str], options: &ParseOptions) -> Vec<HtmlParser> {
    inputs
        .par_iter()
        .map(|html| {
            let mut parser = HtmlParser::new();
            parser.parse_with_options(html, options, DefaultHooks);
            parser
        })
        .collect()
}

/// Collect one attribute's values from every start tag of type `tag`
///
/// Attributes are parsed on demand, only for matching tags. Tags without the
/// attribute are skipped; a boolean attribute yields an empty string.
pub fn collect_attribute_parallel(inputs: &[&str], tag: TagType, attr: &str) -> Vec<Vec<String>> {
    inputs
        .par_iter()
        .map(|html| {
            let mut parser = HtmlParser::new();
            parser.parse(html, false);
            let values: Vec<String> = parser
                .iter()
                .filter(|node| node.kind() == NodeKind::StartTag && node.is(tag))
                .filter_map(|node| node.attribute_value(attr).map(str::to_string))
                .collect();
            values
        })
        .collect()
}
