//! Character Reference Decoding
//!
//! Decodes the character references found in HTML text and attribute values:
//! - Common named references: &lt; &gt; &amp; &quot; &apos; &nbsp; ...
//! - Numeric character references: &#123; &#x7B;
//!
//! Uses Cow for zero-copy when no references are present. Nodes keep their
//! raw text; decoding only happens when a caller asks for it.

use memchr::memchr;
use std::borrow::Cow;

/// Longest reference body we look for, without '&' and ';'
const MAX_REFERENCE_LEN: usize = 16;

/// Decode text, handling character references
///
/// Returns Borrowed if no references are present,
/// returns Owned if references were decoded.
#[inline]
pub fn decode_text(input: &str) -> Cow<'_, str> {
    // Fast path: check if there are any references using SIMD
    if memchr(b'&', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_references(input))
}

/// Decode all character references in the input
///
/// Unknown references and a '&' without ';' are kept as written.
pub fn decode_references(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut result = String::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + amp;
        result.push_str(&input[pos..amp]);

        let window_end = bytes.len().min(amp + 2 + MAX_REFERENCE_LEN);
        let decoded = memchr(b';', &bytes[amp + 1..window_end])
            .and_then(|len| {
                let reference = &input[amp + 1..amp + 1 + len];
                decode_reference(reference).map(|c| (c, len))
            });

        match decoded {
            Some((c, len)) => {
                result.push(c);
                pos = amp + len + 2;
            }
            None => {
                result.push('&');
                pos = amp + 1;
            }
        }
    }
    result.push_str(&input[pos..]);
    result
}

/// Decode a single reference (without '&' and ';')
fn decode_reference(reference: &str) -> Option<char> {
    if let Some(numeric) = reference.strip_prefix('#') {
        return decode_numeric(numeric);
    }

    let c = match reference {
        "lt" => '<',
        "gt" => '>',
        "amp" => '&',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "hellip" => '\u{2026}',
        "middot" => '\u{00B7}',
        "bull" => '\u{2022}',
        "euro" => '\u{20AC}',
        "pound" => '\u{00A3}',
        "yen" => '\u{00A5}',
        "cent" => '\u{00A2}',
        "sect" => '\u{00A7}',
        "deg" => '\u{00B0}',
        "times" => '\u{00D7}',
        "divide" => '\u{00F7}',
        _ => return None,
    };
    Some(c)
}

/// Non-empty and every byte passes `pred`; rules out the sign `parse` accepts
#[inline]
fn is_all(digits: &str, pred: fn(&u8) -> bool) -> bool {
    !digits.is_empty() && digits.bytes().all(|b| pred(&b))
}

/// Decode a numeric character reference body (after '#')
fn decode_numeric(body: &str) -> Option<char> {
    let codepoint = match body.strip_prefix(['x', 'X']) {
        // Hexadecimal: &#xHHHH;
        Some(hex) if is_all(hex, u8::is_ascii_hexdigit) => u32::from_str_radix(hex, 16).ok()?,
        // Decimal: &#DDDD;
        None if is_all(body, u8::is_ascii_digit) => body.parse::<u32>().ok()?,
        _ => return None,
    };
    if codepoint == 0 {
        return Some('\u{FFFD}');
    }
    char::from_u32(codepoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_references() {
        let result = decode_text("Hello, World!");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Hello, World!");
    }

    #[test]
    fn test_basic_references() {
        assert_eq!(
            decode_text("&lt;hello&gt; &amp; &quot;world&quot;"),
            "<hello> & \"world\""
        );
    }

    #[test]
    fn test_numeric() {
        assert_eq!(decode_text("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_text("&#x1F600;"), "😀");
        assert_eq!(decode_text("&#0;"), "\u{FFFD}");
    }

    #[test]
    fn test_signed_numeric_kept() {
        assert_eq!(decode_text("&#+65;"), "&#+65;");
        assert_eq!(decode_text("&#x+41;"), "&#x+41;");
        assert_eq!(decode_text("&#-65;&#;&#x;"), "&#-65;&#;&#x;");
    }

    #[test]
    fn test_long_reference_kept() {
        let long = format!("&#{};", "1".repeat(40));
        assert_eq!(decode_text(&long), long);
        let many = format!("{}x;", "&#".repeat(5_000));
        assert_eq!(decode_text(&many), many);
    }

    #[test]
    fn test_unknown_or_unterminated_kept() {
        assert_eq!(decode_text("&unknown; & &amp"), "&unknown; & &amp");
        assert_eq!(decode_text("a&b;c"), "a&b;c");
        assert_eq!(decode_text("&#xZZ;"), "&#xZZ;");
    }

    #[test]
    fn test_query_string_is_untouched() {
        assert_eq!(
            decode_text("/search?q=a&page=2;x"),
            "/search?q=a&page=2;x"
        );
    }

    #[test]
    fn test_non_ascii_around_references() {
        assert_eq!(decode_text("é&nbsp;ü"), "é\u{00A0}ü");
    }
}
