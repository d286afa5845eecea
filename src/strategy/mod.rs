//! Multi-document strategies
//!
//! A parser holds one document at a time and is not shared across threads;
//! these helpers run one independent parser per document.

pub mod parallel;

pub use parallel::{collect_attribute_parallel, parse_parallel};
