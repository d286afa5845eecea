//! Span - offset and length into the source input
//!
//! Zero-copy reference to a portion of the input document.
//! Used for raw node text, tag names, attribute names and values.

/// A span referencing a portion of the input document.
///
/// Offsets are `usize`, so any input that fits in memory is addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    /// Byte offset into the source input
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Create a span covering `start..end`
    #[inline]
    pub const fn from_range(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end.saturating_sub(start),
        }
    }

    /// Create an empty span (used for "no value")
    #[inline]
    pub const fn empty() -> Self {
        Self { offset: 0, len: 0 }
    }

    /// Check if this span is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start offset
    #[inline]
    pub const fn start(&self) -> usize {
        self.offset
    }

    /// Get the end offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Extract the byte slice from input
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        input.get(self.start()..self.end()).unwrap_or(&[])
    }

    /// Extract the string slice from input
    ///
    /// Spans produced by the tokenizer always start and end next to ASCII
    /// delimiters, so they fall on character boundaries.
    #[inline]
    pub fn as_str<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start()..self.end()).unwrap_or("")
    }

    /// Span of `[start, end)` relative to this span's start
    #[inline]
    pub const fn sub(&self, start: usize, end: usize) -> Self {
        Self::from_range(self.start() + start, self.start() + end)
    }
}
