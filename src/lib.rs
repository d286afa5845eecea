//! htmlscan - Fast streaming HTML scanning with lazy attributes
//!
//! Walks raw HTML once and produces a flat, ordered list of nodes (start
//! tags, end tags, text, comments) without building a tree:
//! - Tags are classified against a fixed vocabulary of HTML tag names
//! - SCRIPT/STYLE/TEXTAREA bodies are kept verbatim as one CDATA node
//! - Attribute lists are parsed eagerly by policy or on first request
//! - A node-ready hook can stop the scan at any node
//!
//! ```
//! use htmlscan::{HtmlParser, NodeKind, TagType};
//!
//! let mut parser = HtmlParser::new();
//! parser.parse("<a href=\"x\">hi</a>", true);
//!
//! let link = parser.node(0).unwrap();
//! assert_eq!(link.kind(), NodeKind::StartTag);
//! assert_eq!(link.tag_type(), TagType::A);
//! assert_eq!(link.attribute_value("href"), Some("x"));
//! assert_eq!(parser.node_count(), 3);
//! ```
//!
//! With the `nif` feature the crate also builds the `HtmlScan.Native` BEAM
//! module.

pub mod core;
pub mod error;
pub mod parser;
pub mod strategy;

#[cfg(feature = "nif")]
mod nif;
#[cfg(feature = "nif")]
mod resource;
#[cfg(feature = "nif")]
mod term;

pub use crate::core::span::Span;
pub use crate::core::tokenizer::NodeFlags;
pub use crate::core::vocabulary::{NodeKind, TagType, TagVocabulary};
pub use error::HtmlError;
pub use parser::{
    AttributeRef, DefaultHooks, HtmlParser, NodeRef, OnNodeReady, ParseAttributesIf, ParseHooks, ParseOptions,
    ParserState,
};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(all(feature = "nif", feature = "mimalloc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
