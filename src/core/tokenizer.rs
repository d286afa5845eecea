//! HTML Tokenizer - single pass over the input producing raw node spans
//!
//! Recognizes:
//! - Start tags (with self-closing detection) and end tags
//! - Comments `<!-- ... -->`
//! - Markup declarations `<!DOCTYPE ...>`, `<?...>`, `<![CDATA[...]]>`
//! - Text runs
//! - Raw-text bodies of SCRIPT, STYLE and TEXTAREA
//!
//! The tokenizer is total: every input produces a sequence of tokens whose
//! spans tile the input exactly. Anything that does not form a complete
//! construct is folded into a text run.
//!
//! Work stays linear on malformed input. A '<' with no '>' anywhere after it
//! starts a text run to end of input. Once a search for a closing delimiter
//! runs out of input it is not repeated: `-->` and `]]>` stay missing for
//! every later position, and after one quote is left open to end of input,
//! later tags end at their first '>'.

use super::scanner::Scanner;
use super::span::Span;
use super::vocabulary::{NodeKind, TagVocabulary};
use memchr::{memmem, memrchr};

/// Per-node flag bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct NodeFlags(u8);

impl NodeFlags {
    /// No flags set
    pub const NONE: NodeFlags = NodeFlags(0);
    /// Start tag written as `<tag/>`
    pub const SELF_CLOSING: NodeFlags = NodeFlags(0x01);
    /// Raw-text body of SCRIPT, STYLE or TEXTAREA
    pub const CDATA_BLOCK: NodeFlags = NodeFlags(0x02);

    /// Raw bit value
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True if every bit of `other` is set
    #[inline]
    pub const fn contains(self, other: NodeFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the bits of `other`
    #[inline]
    pub fn insert(&mut self, other: NodeFlags) {
        self.0 |= other.0;
    }

    /// True if no bit is set
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for NodeFlags {
    type Output = NodeFlags;

    fn bitor(self, rhs: NodeFlags) -> NodeFlags {
        NodeFlags(self.0 | rhs.0)
    }
}

/// Current tokenizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Between nodes, tokenizing markup and text
    Markup,
    /// After a raw-text start tag; holds the span of its name
    RawText(Span),
    /// End of input reached
    Done,
}

/// A raw token with its provisional kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Provisional node kind
    pub kind: NodeKind,
    /// Exact source span of the node
    pub span: Span,
    /// Tag name, for start and end tags
    pub name: Span,
    /// Interior: attribute text of tags, body of comments and declarations,
    /// the whole span for text
    pub inner: Span,
    /// SELF_CLOSING / CDATA_BLOCK
    pub flags: NodeFlags,
}

impl Token {
    fn text(start: usize, end: usize) -> Self {
        let span = Span::from_range(start, end);
        Token {
            kind: NodeKind::Content,
            span,
            name: Span::empty(),
            inner: span,
            flags: NodeFlags::NONE,
        }
    }
}

/// Pull tokenizer over a complete HTML buffer
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
    raw_text: bool,
    /// Last '>' in the input
    last_gt: Option<usize>,
    /// A quoted tag-end search ran out of input
    open_quote: bool,
    /// No `-->` at or after this offset
    no_comment_close: Option<usize>,
    /// No `]]>` at or after this offset
    no_cdata_close: Option<usize>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Markup,
            raw_text: true,
            last_gt: memrchr(b'>', input),
            open_quote: false,
            no_comment_close: None,
            no_cdata_close: None,
        }
    }

    /// Disable raw-text handling of SCRIPT/STYLE/TEXTAREA bodies
    pub fn without_raw_text(mut self) -> Self {
        self.raw_text = false;
        self
    }

    /// Get the current tokenizer state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Get the current position in the input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, or None at end of input
    pub fn next_token(&mut self) -> Option<Token> {
        if let ParseState::RawText(name) = self.state {
            self.state = ParseState::Markup;
            if let Some(token) = self.scan_raw_text(name) {
                return Some(token);
            }
        }

        if self.state == ParseState::Done || self.scanner.is_eof() {
            self.state = ParseState::Done;
            return None;
        }

        let start = self.scanner.position();
        if self.scanner.peek() == Some(b'<') {
            if self.last_gt.is_none_or(|gt| gt < start) {
                let end = self.scanner.len();
                self.scanner.set_position(end);
                return Some(Token::text(start, end));
            }
            if let Some(token) = self.scan_markup(start) {
                self.scanner.set_position(token.span.end());
                self.enter_raw_text(&token);
                return Some(token);
            }
        }

        let end = self.find_text_end(start + 1);
        self.scanner.set_position(end);
        Some(Token::text(start, end))
    }

    /// Switch to raw-text mode after an opening SCRIPT/STYLE/TEXTAREA tag
    fn enter_raw_text(&mut self, token: &Token) {
        if !self.raw_text
            || token.kind != NodeKind::StartTag
            || token.flags.contains(NodeFlags::SELF_CLOSING)
        {
            return;
        }
        let name = token.name.slice(self.scanner.input());
        if TagVocabulary::raw_text(name).is_some() {
            log::trace!("raw-text block after <{}>", String::from_utf8_lossy(name));
            self.state = ParseState::RawText(token.name);
        }
    }

    /// Emit the verbatim body up to the matching end tag
    fn scan_raw_text(&mut self, name: Span) -> Option<Token> {
        let start = self.scanner.position();
        let name = self.scanner.slice(name.start(), name.end());
        let end = self
            .scanner
            .find_end_tag_ci(start, name)
            .unwrap_or(self.scanner.len());
        if end == start {
            return None;
        }
        self.scanner.set_position(end);
        let mut token = Token::text(start, end);
        token.flags = NodeFlags::CDATA_BLOCK;
        Some(token)
    }

    /// End of a text run: the next '<' that opens markup, or end of input
    fn find_text_end(&self, from: usize) -> usize {
        let mut pos = from;
        while let Some(lt) = self.scanner.find_tag_start(pos) {
            if self.is_markup_start(lt) {
                return lt;
            }
            pos = lt + 1;
        }
        self.scanner.len()
    }

    /// Whether the '<' at `lt` can begin a tag, comment or declaration
    fn is_markup_start(&self, lt: usize) -> bool {
        match self.scanner.byte_at(lt + 1) {
            Some(b) if b.is_ascii_alphabetic() => true,
            Some(b'!') | Some(b'?') => true,
            Some(b'/') => self
                .scanner
                .byte_at(lt + 2)
                .is_some_and(|b| b.is_ascii_alphabetic()),
            _ => false,
        }
    }

    /// Try to scan a complete construct starting at the '<' at `start`
    fn scan_markup(&mut self, start: usize) -> Option<Token> {
        match self.scanner.byte_at(start + 1)? {
            b'/' => self.scan_end_tag(start),
            b'!' if self.scanner.starts_with_at(start, b"<!--") => self.scan_comment(start),
            b'!' if self.scanner.starts_with_at(start, b"<![CDATA[") => self.scan_cdata(start),
            b'!' | b'?' => {
                let body = start + 2;
                let gt = self.scanner.find_tag_end(body)?;
                Some(self.declaration(start, body, gt, gt + 1))
            }
            b if b.is_ascii_alphabetic() => self.scan_start_tag(start),
            _ => None,
        }
    }

    fn scan_start_tag(&mut self, start: usize) -> Option<Token> {
        let name_end = self.scanner.read_tag_name(start + 1)?;
        let quoted = if self.open_quote {
            None
        } else {
            self.scanner.find_tag_end_quoted(name_end)
        };
        let gt = match quoted {
            Some(gt) => gt,
            None => {
                // An unbalanced quote falls back to the first '>'
                if !self.open_quote {
                    log::trace!("quote left open from offset {name_end}");
                    self.open_quote = true;
                }
                self.scanner.find_tag_end(name_end)?
            }
        };

        let mut flags = NodeFlags::NONE;
        let mut inner_end = gt;
        if gt > name_end && self.scanner.byte_at(gt - 1) == Some(b'/') {
            flags.insert(NodeFlags::SELF_CLOSING);
            inner_end = gt - 1;
        }

        Some(Token {
            kind: NodeKind::StartTag,
            span: Span::from_range(start, gt + 1),
            name: Span::from_range(start + 1, name_end),
            inner: Span::from_range(name_end, inner_end),
            flags,
        })
    }

    fn scan_end_tag(&self, start: usize) -> Option<Token> {
        let name_end = self.scanner.read_tag_name(start + 2)?;
        let gt = self.scanner.find_tag_end(name_end)?;
        Some(Token {
            kind: NodeKind::EndTag,
            span: Span::from_range(start, gt + 1),
            name: Span::from_range(start + 2, name_end),
            inner: Span::from_range(name_end, gt),
            flags: NodeFlags::NONE,
        })
    }

    fn scan_comment(&mut self, start: usize) -> Option<Token> {
        let body = start + 4;
        if self.no_comment_close.is_some_and(|from| from <= body) {
            return None;
        }
        let Some(close) = self.scanner.find_comment_end(body) else {
            self.no_comment_close = Some(body);
            return None;
        };
        Some(Token {
            kind: NodeKind::Remarks,
            span: Span::from_range(start, close + 3),
            name: Span::empty(),
            inner: Span::from_range(body, close),
            flags: NodeFlags::NONE,
        })
    }

    fn scan_cdata(&mut self, start: usize) -> Option<Token> {
        let body = start + 9;
        if self.no_cdata_close.is_some_and(|from| from <= body) {
            return None;
        }
        let found = memmem::find(self.scanner.slice(body, self.scanner.len()), b"]]>");
        let Some(close) = found else {
            self.no_cdata_close = Some(body);
            return None;
        };
        Some(self.declaration(start, body, body + close, body + close + 3))
    }

    fn declaration(&self, start: usize, body: usize, body_end: usize, end: usize) -> Token {
        Token {
            kind: NodeKind::Unknown,
            span: Span::from_range(start, end),
            name: Span::empty(),
            inner: Span::from_range(body, body_end),
            flags: NodeFlags::NONE,
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
