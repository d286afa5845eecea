//! Caller hooks consulted during a parse
//!
//! All three hooks run synchronously on the parsing call stack:
//! - `identify_tag`: tag name to tag type, once per tag node
//! - `should_parse_attributes`: eager attribute decision, once per tag node
//!   when the parse was not started with eager attributes
//! - `on_node_ready`: once per finished node in document order; returning
//!   false drops that node and aborts the parse

use super::node::NodeRef;
use crate::core::classifier::identify_default;
use crate::core::vocabulary::{NodeKind, TagType};

/// Hooks for one parse
///
/// Every method has the default behaviour, so implementors only override
/// what they need.
pub trait ParseHooks {
    /// Tag type for a tag name; not consulted for SCRIPT, STYLE, TEXTAREA
    fn identify_tag(&mut self, name: &str, kind: NodeKind) -> TagType {
        identify_default(name, kind)
    }

    /// Whether to parse this tag's attributes right away
    ///
    /// Defaults to tags with a known tag type.
    fn should_parse_attributes(&mut self, _name: &str, tag_type: TagType) -> bool {
        tag_type.is_known()
    }

    /// Called for each finished node; return false to drop it and stop parsing
    fn on_node_ready(&mut self, _node: &NodeRef<'_>) -> bool {
        true
    }
}

/// Default policy for every hook
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl ParseHooks for DefaultHooks {}

impl<H: ParseHooks + ?Sized> ParseHooks for &mut H {
    fn identify_tag(&mut self, name: &str, kind: NodeKind) -> TagType {
        (**self).identify_tag(name, kind)
    }

    fn should_parse_attributes(&mut self, name: &str, tag_type: TagType) -> bool {
        (**self).should_parse_attributes(name, tag_type)
    }

    fn on_node_ready(&mut self, node: &NodeRef<'_>) -> bool {
        (**self).on_node_ready(node)
    }
}

/// Node-ready hook from a closure, other hooks at their defaults
pub struct OnNodeReady<F>(pub F);

impl<F> ParseHooks for OnNodeReady<F>
where
    F: FnMut(&NodeRef<'_>) -> bool,
{
    fn on_node_ready(&mut self, node: &NodeRef<'_>) -> bool {
        (self.0)(node)
    }
}

/// Attribute decision from a closure, other hooks at their defaults
pub struct ParseAttributesIf<F>(pub F);

impl<F> ParseHooks for ParseAttributesIf<F>
where
    F: FnMut(&str, TagType) -> bool,
{
    fn should_parse_attributes(&mut self, name: &str, tag_type: TagType) -> bool {
        (self.0)(name, tag_type)
    }
}
