//! BEAM bindings (`HtmlScan.Native`)
//!
//! The BEAM cannot answer a node-ready callback synchronously, so early
//! abort is offered through `max_nodes` instead.

use crate::core::vocabulary::{NodeKind, TagType, TagVocabulary};
use crate::error::HtmlError;
use crate::parser::{DefaultHooks, ParseOptions};
use crate::resource::{HtmlParserRef, HtmlParserResource};
use crate::term::{attribute_to_term, attributes_to_term, kind_atom, node_to_term, state_atom};
use rustler::{Atom, Binary, Encoder, Env, NifResult, ResourceArc, Term};

fn to_nif_error(err: HtmlError) -> rustler::Error {
    rustler::Error::Term(Box::new(err.to_string()))
}

fn nil<'a>(env: Env<'a>) -> Term<'a> {
    rustler::types::atom::nil().encode(env)
}

// ============================================================================
// Parser lifecycle
// ============================================================================

/// Create a new idle parser
#[rustler::nif]
fn parser_new() -> HtmlParserRef {
    ResourceArc::new(HtmlParserResource::new())
}

/// Parse a document, replacing the parser's previous nodes
///
/// Invalid UTF-8 is replaced with U+FFFD before scanning.
/// Returns `{state, node_count}`.
#[rustler::nif(schedule = "DirtyCpu")]
fn parse(parser: HtmlParserRef, html: Binary, eager: bool, max_nodes: Option<usize>) -> NifResult<(Atom, usize)> {
    let text = String::from_utf8_lossy(html.as_slice());
    let mut options = ParseOptions::new().eager_attributes(eager);
    options.max_nodes = max_nodes;

    parser
        .with_parser(|p| {
            let state = p.parse_with_options(&text, &options, DefaultHooks);
            (state_atom(state), p.node_count())
        })
        .map_err(to_nif_error)
}

/// Current parser state
#[rustler::nif]
fn parser_state(parser: HtmlParserRef) -> NifResult<Atom> {
    parser.with_parser(|p| state_atom(p.state())).map_err(to_nif_error)
}

/// Number of nodes from the latest parse
#[rustler::nif]
fn node_count(parser: HtmlParserRef) -> NifResult<usize> {
    parser.with_parser(|p| p.node_count()).map_err(to_nif_error)
}

// ============================================================================
// Node queries
// ============================================================================

/// Node at a 0-based index, or nil
#[rustler::nif]
fn node_at<'a>(env: Env<'a>, parser: HtmlParserRef, index: usize) -> NifResult<Term<'a>> {
    parser
        .with_parser(|p| match p.node(index) {
            Some(node) => node_to_term(env, &node),
            None => nil(env),
        })
        .map_err(to_nif_error)
}

/// Every node in document order
#[rustler::nif(schedule = "DirtyCpu")]
fn node_list<'a>(env: Env<'a>, parser: HtmlParserRef) -> NifResult<Term<'a>> {
    parser
        .with_parser(|p| {
            let mut list = Term::list_new_empty(env);
            for index in (0..p.node_count()).rev() {
                if let Some(node) = p.node(index) {
                    list = list.list_prepend(node_to_term(env, &node));
                }
            }
            list
        })
        .map_err(to_nif_error)
}

/// Attribute value by exact name; nil when the node or attribute is missing
#[rustler::nif]
fn node_attr<'a>(env: Env<'a>, parser: HtmlParserRef, index: usize, name: &str) -> NifResult<Term<'a>> {
    parser
        .with_parser(|p| {
            match p.node(index).and_then(|node| node.attribute(name)) {
                Some(attr) => attr.value_or_empty().encode(env),
                None => nil(env),
            }
        })
        .map_err(to_nif_error)
}

/// `{name, value}` of the attribute at a 0-based index, or nil
#[rustler::nif]
fn node_attr_at<'a>(env: Env<'a>, parser: HtmlParserRef, index: usize, attr_index: usize) -> NifResult<Term<'a>> {
    parser
        .with_parser(|p| {
            match p.node(index).and_then(|node| node.attribute_at(attr_index)) {
                Some(attr) => attribute_to_term(env, &attr),
                None => nil(env),
            }
        })
        .map_err(to_nif_error)
}

/// All attributes of a node as `{name, value}` pairs, parsing them if needed
#[rustler::nif]
fn node_attrs<'a>(env: Env<'a>, parser: HtmlParserRef, index: usize) -> NifResult<Term<'a>> {
    parser
        .with_parser(|p| match p.node(index) {
            Some(node) => attributes_to_term(env, &node),
            None => nil(env),
        })
        .map_err(to_nif_error)
}

// ============================================================================
// Constant tables
// ============================================================================

/// Known tag names with their codes
#[rustler::nif]
fn tag_types() -> Vec<(&'static str, u16)> {
    TagVocabulary::entries().map(|(name, tag)| (name, tag.code())).collect()
}

/// Built-in node kinds with their codes
#[rustler::nif]
fn node_kinds() -> Vec<(Atom, u8)> {
    (1..NodeKind::USER)
        .filter_map(NodeKind::from_code)
        .map(|kind| (kind_atom(kind), kind.code()))
        .collect()
}

// ============================================================================
// Parallel extraction
// ============================================================================

/// Collect one attribute's values from every start tag of a given type,
/// across many documents in parallel
#[rustler::nif(schedule = "DirtyCpu")]
fn collect_attribute(inputs: Vec<Binary>, tag: u16, attr: &str) -> Vec<Vec<String>> {
    let texts: Vec<String> = inputs
        .iter()
        .map(|html| String::from_utf8_lossy(html.as_slice()).into_owned())
        .collect();
    let docs: Vec<&str> = texts.iter().map(String::as_str).collect();
    crate::strategy::collect_attribute_parallel(&docs, TagType(tag), attr)
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.HtmlScan.Native");
