//! Core HTML scanning primitives
//!
//! This module contains the lexical building blocks:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: single pass producing raw node spans and provisional kinds
//! - Attributes: on-demand attribute list parsing
//! - Vocabulary: tag name to tag type table, node kind codes
//! - Classifier: tag type assignment with the raw-text special case
//! - Entities: character reference decoding with Cow (zero-copy when possible)
//! - Span: offset/length references into the input

pub mod attributes;
pub mod classifier;
pub mod entities;
pub mod scanner;
pub mod span;
pub mod tokenizer;
pub mod vocabulary;
