//! HTML Attribute Parsing
//!
//! Parses the attribute list of a tag from the text between the tag name and
//! the closing `>` or `/>`. Scanning never fails: unterminated quotes take the
//! rest of the text as the value, stray characters become attribute names.

use super::scanner::is_whitespace;
use super::span::Span;
use memchr::memchr;

/// A parsed attribute, as spans into the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, never empty
    pub name: Span,
    /// Attribute value without quotes; None for `<input disabled>`
    pub value: Option<Span>,
}

/// Parse the attributes in `span` of `input`
///
/// Spans of the returned attributes are absolute offsets into `input`.
pub fn parse_attributes(input: &[u8], span: Span) -> Vec<Attribute> {
    let text = span.slice(input);
    let base = span.start();
    let mut attrs = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        // Whitespace and stray slashes separate attributes
        while pos < text.len() && (is_whitespace(text[pos]) || text[pos] == b'/') {
            pos += 1;
        }
        if pos >= text.len() {
            break;
        }

        // The first byte always belongs to the name, even if it is '='
        let name_start = pos;
        pos += 1;
        while pos < text.len() && !is_name_terminator(text[pos]) {
            pos += 1;
        }
        let name = Span::from_range(base + name_start, base + pos);

        let mut lookahead = pos;
        while lookahead < text.len() && is_whitespace(text[lookahead]) {
            lookahead += 1;
        }
        if lookahead >= text.len() || text[lookahead] != b'=' {
            attrs.push(Attribute { name, value: None });
            continue;
        }

        // Skip '=' and whitespace before the value
        pos = lookahead + 1;
        while pos < text.len() && is_whitespace(text[pos]) {
            pos += 1;
        }

        let value = match text.get(pos) {
            None => Span::from_range(base + pos, base + pos),
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = pos + 1;
                match memchr(quote, &text[value_start..]) {
                    Some(len) => {
                        pos = value_start + len + 1;
                        Span::from_range(base + value_start, base + value_start + len)
                    }
                    None => {
                        // Unterminated: the rest of the tag is the value
                        pos = text.len();
                        Span::from_range(base + value_start, base + pos)
                    }
                }
            }
            Some(_) => {
                let value_start = pos;
                while pos < text.len() && !is_whitespace(text[pos]) && text[pos] != b'>' {
                    pos += 1;
                }
                Span::from_range(base + value_start, base + pos)
            }
        };
        attrs.push(Attribute {
            name,
            value: Some(value),
        });
    }

    attrs
}

#[inline]
fn is_name_terminator(b: u8) -> bool {
    is_whitespace(b) || matches!(b, b'=' | b'/' | b'>')
}
