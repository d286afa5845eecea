//! Tag classification
//!
//! Every start and end tag gets a [`TagType`] at the moment it is produced,
//! before any attribute work. SCRIPT, STYLE and TEXTAREA are fixed because the
//! tokenizer treats their bodies as raw text; every other name goes through
//! the caller's identification hook, which by default is a
//! [`TagVocabulary`] lookup.

use super::vocabulary::{NodeKind, TagType, TagVocabulary};

/// Tag type of a tag named `name`
///
/// `identify` is only consulted for names that are not raw-text tags.
#[inline]
pub fn classify<F>(name: &str, kind: NodeKind, identify: F) -> TagType
where
    F: FnOnce(&str, NodeKind) -> TagType,
{
    match TagVocabulary::raw_text(name.as_bytes()) {
        Some(tag) => tag,
        None => identify(name, kind),
    }
}

/// Default identification: static vocabulary lookup
#[inline]
pub fn identify_default(name: &str, _kind: NodeKind) -> TagType {
    TagVocabulary::lookup(name.as_bytes())
}
