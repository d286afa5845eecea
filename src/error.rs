//! API misuse errors
//!
//! Parsing itself never fails. These errors only describe a caller asking
//! for something that does not exist.

/// Misuse of a parser or node handle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HtmlError {
    /// No node at this index in the current parse
    #[error("node index {index} out of range (node count {count})")]
    NodeIndex { index: usize, count: usize },

    /// No attribute at this index on the node
    #[error("attribute index {index} out of range (attribute count {count})")]
    AttributeIndex { index: usize, count: usize },

    /// A shared parser was poisoned by a panic in another caller
    #[error("parser lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            HtmlError::NodeIndex { index: 4, count: 2 }.to_string(),
            "node index 4 out of range (node count 2)"
        );
        assert_eq!(HtmlError::Poisoned.to_string(), "parser lock poisoned");
    }
}
