//! ResourceArc Wrappers
//!
//! Persistent parser state for the BEAM side.

use crate::error::HtmlError;
use crate::parser::HtmlParser;
use rustler::ResourceArc;
use std::sync::Mutex;

/// Wrapper for HtmlParser that can be stored in a ResourceArc
///
/// Nodes live as long as the resource; dropping the last reference on the
/// BEAM side releases the input copy and every node.
pub struct HtmlParserResource {
    pub inner: Mutex<HtmlParser>,
}

impl HtmlParserResource {
    pub fn new() -> Self {
        HtmlParserResource {
            inner: Mutex::new(HtmlParser::new()),
        }
    }

    /// Run `f` with exclusive access to the parser
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::Poisoned`] if a previous caller panicked while
    /// holding the parser.
    pub fn with_parser<F, R>(&self, f: F) -> Result<R, HtmlError>
    where
        F: FnOnce(&mut HtmlParser) -> R,
    {
        let mut guard = self.inner.lock().map_err(|_| HtmlError::Poisoned)?;
        Ok(f(&mut guard))
    }
}

#[rustler::resource_impl]
impl rustler::Resource for HtmlParserResource {}

impl Default for HtmlParserResource {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for the ResourceArc
pub type HtmlParserRef = ResourceArc<HtmlParserResource>;
