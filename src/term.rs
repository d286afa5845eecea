//! Elixir Term Conversion Utilities
//!
//! Converts parser nodes and states to Elixir terms.

use crate::core::vocabulary::NodeKind;
use crate::parser::{AttributeRef, NodeRef, ParserState};
use rustler::{Atom, Encoder, Env, NewBinary, Term};

rustler::atoms! {
    idle,
    scanning,
    finished,
    aborted,
    start_tag,
    end_tag,
    content,
    remarks,
    unknown,
}

/// Atom for a driver state
pub fn state_atom(state: ParserState) -> Atom {
    match state {
        ParserState::Idle => idle(),
        ParserState::Scanning => scanning(),
        ParserState::Finished => finished(),
        ParserState::Aborted => aborted(),
    }
}

/// Atom for a node kind
pub fn kind_atom(kind: NodeKind) -> Atom {
    match kind {
        NodeKind::StartTag => start_tag(),
        NodeKind::EndTag => end_tag(),
        NodeKind::Content => content(),
        NodeKind::Remarks => remarks(),
        NodeKind::Unknown => unknown(),
    }
}

/// Convert a node to `{kind, tag_type, tag_name | nil, text, self_closing, cdata}`
///
/// Does not touch the attribute list, so lazy nodes stay lazy.
pub fn node_to_term<'a>(env: Env<'a>, node: &NodeRef<'_>) -> Term<'a> {
    let name = match node.tag_name() {
        Some(name) => str_to_binary(env, name),
        None => rustler::types::atom::nil().encode(env),
    };
    (
        kind_atom(node.kind()),
        node.tag_type().code(),
        name,
        str_to_binary(env, node.text()),
        node.is_self_closing(),
        node.is_cdata(),
    )
        .encode(env)
}

/// Convert an attribute to `{name, value}`; a missing value reads as ""
pub fn attribute_to_term<'a>(env: Env<'a>, attr: &AttributeRef<'_>) -> Term<'a> {
    (str_to_binary(env, attr.name()), str_to_binary(env, attr.value_or_empty())).encode(env)
}

/// Convert a node's attributes to a list of `{name, value}`, parsing them
/// if needed
pub fn attributes_to_term<'a>(env: Env<'a>, node: &NodeRef<'_>) -> Term<'a> {
    let attrs: Vec<_> = node.attributes().collect();
    let mut list = Term::list_new_empty(env);
    for attr in attrs.iter().rev() {
        list = list.list_prepend(attribute_to_term(env, attr));
    }
    list
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
