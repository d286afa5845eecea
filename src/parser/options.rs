//! Parse configuration

/// Options for one parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse every tag's attributes immediately, skipping the
    /// `should_parse_attributes` hook
    pub eager_attributes: bool,
    /// Stop after this many nodes, as if the node-ready hook returned false
    pub max_nodes: Option<usize>,
    /// Treat SCRIPT/STYLE/TEXTAREA bodies as raw text (default)
    pub raw_text: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            eager_attributes: false,
            max_nodes: None,
            raw_text: true,
        }
    }
}

impl ParseOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set eager attribute parsing
    pub fn eager_attributes(mut self, eager: bool) -> Self {
        self.eager_attributes = eager;
        self
    }

    /// Cap the number of committed nodes
    pub fn max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    /// Toggle raw-text handling; only useful for diagnostics
    pub fn raw_text(mut self, enabled: bool) -> Self {
        self.raw_text = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = ParseOptions::new().eager_attributes(true).max_nodes(5);
        assert!(options.eager_attributes);
        assert_eq!(options.max_nodes, Some(5));
        assert!(options.raw_text);
        assert!(!ParseOptions::default().raw_text(false).raw_text);
    }
}
