//! SIMD-accelerated HTML scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::memchr;
use memchr::memmem;

/// Cursor over the input with delimiter search helpers
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// The whole input
    #[inline]
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Total input length
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Byte at an absolute position
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.get(pos).copied()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Check if input starts with a byte sequence at an absolute position
    #[inline]
    pub fn starts_with_at(&self, pos: usize, needle: &[u8]) -> bool {
        self.input.get(pos..).is_some_and(|rest| rest.starts_with(needle))
    }

    /// Find next '<' at or after `from` using SIMD
    #[inline]
    pub fn find_tag_start(&self, from: usize) -> Option<usize> {
        memchr(b'<', self.input.get(from..)?).map(|i| from + i)
    }

    /// Find next '>' at or after `from`, ignoring quotes
    #[inline]
    pub fn find_tag_end(&self, from: usize) -> Option<usize> {
        memchr(b'>', self.input.get(from..)?).map(|i| from + i)
    }

    /// Find tag end while handling quotes properly
    ///
    /// Returns the position of a '>' that is not inside quotes. Quotes only
    /// open after `=` so that apostrophes in bare words do not swallow the
    /// rest of the document.
    pub fn find_tag_end_quoted(&self, from: usize) -> Option<usize> {
        let mut pos = from;
        let mut quote: Option<u8> = None;
        let mut after_eq = false;

        while pos < self.input.len() {
            let b = self.input[pos];
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => match b {
                    b'>' => return Some(pos),
                    b'"' | b'\'' if after_eq => {
                        quote = Some(b);
                        after_eq = false;
                    }
                    b'=' => after_eq = true,
                    b' ' | b'\t' | b'\n' | b'\r' | b'\x0C' => {}
                    _ => after_eq = false,
                },
            }
            pos += 1;
        }
        None
    }

    /// Find the start of `-->` at or after `from`
    #[inline]
    pub fn find_comment_end(&self, from: usize) -> Option<usize> {
        memmem::find(self.input.get(from..)?, b"-->").map(|i| from + i)
    }

    /// Find `</name` (ASCII case-insensitive) at or after `from`, where the
    /// name is followed by whitespace, '/', '>' or end of input.
    ///
    /// Returns the position of the '<'.
    pub fn find_end_tag_ci(&self, from: usize, name: &[u8]) -> Option<usize> {
        let mut pos = from;
        while let Some(lt) = self.find_tag_start(pos) {
            let name_start = lt + 2;
            let name_end = name_start + name.len();
            if self.byte_at(lt + 1) == Some(b'/')
                && name_end <= self.input.len()
                && self.input[name_start..name_end].eq_ignore_ascii_case(name)
                && self.byte_at(name_end).is_none_or(is_tag_name_terminator)
            {
                return Some(lt);
            }
            pos = lt + 1;
        }
        None
    }

    /// Read a tag name starting at `from`, returning its end position
    ///
    /// A tag name starts with an ASCII letter and runs until whitespace,
    /// '/', '>' or end of input.
    pub fn read_tag_name(&self, from: usize) -> Option<usize> {
        if !self.byte_at(from)?.is_ascii_alphabetic() {
            return None;
        }
        let mut pos = from + 1;
        while pos < self.input.len() && !is_tag_name_terminator(self.input[pos]) {
            pos += 1;
        }
        Some(pos)
    }
}

/// Whitespace as far as tag and attribute syntax is concerned
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

#[inline]
fn is_tag_name_terminator(b: u8) -> bool {
    is_whitespace(b) || b == b'/' || b == b'>'
}
