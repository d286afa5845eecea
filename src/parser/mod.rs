//! Parser driver and node store
//!
//! - `driver`: HtmlParser state machine, one parse at a time
//! - `node`: stored nodes and the borrowed `NodeRef`/`AttributeRef` views
//! - `store`: append-only node storage
//! - `hooks`: caller hooks consulted during a parse
//! - `options`: per-parse configuration

pub mod driver;
pub mod hooks;
pub mod node;
pub mod options;
pub mod store;

pub use driver::{HtmlParser, Nodes, ParserState};
pub use hooks::{DefaultHooks, OnNodeReady, ParseAttributesIf, ParseHooks};
pub use node::{AttributeRef, Attributes, NodeRef};
pub use options::ParseOptions;
pub use store::NodeStore;
