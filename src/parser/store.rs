//! Append-only node storage for one parse

use super::node::Node;

/// Ordered sequence of finalized nodes
///
/// Appended to while a parse is scanning, read-only afterwards until the
/// owning parser starts the next parse and clears it.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    /// Create an empty store
    pub fn new() -> Self {
        NodeStore { nodes: Vec::new() }
    }

    /// Create with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        NodeStore {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Append a node, returning its index
    #[inline]
    pub(crate) fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Keep only the first `len` nodes
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    /// Drop every node, keeping the allocation
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Number of committed nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node was committed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at a 0-based position
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Nodes in document order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}
