//! Tag vocabulary and node kind codes
//!
//! The numeric values are a stable contract with embedding callers:
//! - Node kinds: START_TAG=1 .. UNKNOWN=5, codes >= 10 reserved for callers
//! - Tag types: UNKNOWN=0, SCRIPT/STYLE/TEXTAREA=1..3, standard elements
//!   alphabetically from A=101, codes >= 300 reserved for callers
//!
//! Lookup upper-cases the name and binary searches a table sorted once on
//! first use. The table is read-only afterwards and shared between threads.

use std::fmt;
use std::sync::OnceLock;

/// Structural kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeKind {
    /// `<tag ...>`
    StartTag = 1,
    /// `</tag>`
    EndTag = 2,
    /// Text run, including raw-text bodies of SCRIPT/STYLE/TEXTAREA
    Content = 3,
    /// `<!-- ... -->`
    Remarks = 4,
    /// Markup declarations and anything else the tokenizer keeps apart
    Unknown = 5,
}

impl NodeKind {
    /// First code available to caller-defined node kinds
    pub const USER: u8 = 10;

    /// Numeric code of this kind
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Kind for a numeric code, if it is one of the built-in kinds
    pub const fn from_code(code: u8) -> Option<NodeKind> {
        match code {
            1 => Some(NodeKind::StartTag),
            2 => Some(NodeKind::EndTag),
            3 => Some(NodeKind::Content),
            4 => Some(NodeKind::Remarks),
            5 => Some(NodeKind::Unknown),
            _ => None,
        }
    }

    /// True for start and end tags
    #[inline]
    pub const fn is_tag(self) -> bool {
        matches!(self, NodeKind::StartTag | NodeKind::EndTag)
    }
}

/// Tag type code of a start or end tag
///
/// A plain code rather than an enum so callers can hand out their own codes
/// from [`TagType::USER`] upwards through a classification hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct TagType(pub u16);

macro_rules! tag_types {
    ($($name:ident = $code:expr,)*) => {
        #[allow(missing_docs)]
        impl TagType {
            $(pub const $name: TagType = TagType($code);)*
        }

        /// Named tag types in code order
        const NAMED: &[(&str, TagType)] = &[$((stringify!($name), TagType($code)),)*];
    };
}

tag_types! {
    SCRIPT = 1,
    STYLE = 2,
    TEXTAREA = 3,
    A = 101,
    ABBR = 102,
    ACRONYM = 103,
    ADDRESS = 104,
    APPLET = 105,
    AREA = 106,
    ARTICLE = 107,
    ASIDE = 108,
    AUDIO = 109,
    B = 110,
    BASE = 111,
    BASEFONT = 112,
    BDI = 113,
    BDO = 114,
    BIG = 115,
    BLOCKQUOTE = 116,
    BODY = 117,
    BR = 118,
    BUTTON = 119,
    CAPTION = 120,
    CENTER = 121,
    CITE = 122,
    CODE = 123,
    COL = 124,
    COLGROUP = 125,
    COMMAND = 126,
    DATALIST = 127,
    DD = 128,
    DEL = 129,
    DETAILS = 130,
    DFN = 131,
    DIR = 132,
    DIV = 133,
    DL = 134,
    DT = 135,
    EM = 136,
    EMBED = 137,
    FIELDSET = 138,
    FIGCAPTION = 139,
    FIGURE = 140,
    FONT = 141,
    FOOTER = 142,
    FORM = 143,
    FRAME = 144,
    FRAMESET = 145,
    H1 = 146,
    H2 = 147,
    H3 = 148,
    H4 = 149,
    H5 = 150,
    H6 = 151,
    HEAD = 152,
    HEADER = 153,
    HGROUP = 154,
    HR = 155,
    HTML = 156,
    I = 157,
    IFRAME = 158,
    IMG = 159,
    INPUT = 160,
    INS = 161,
    ISINDEX = 162,
    KBD = 163,
    KEYGEN = 164,
    LABEL = 165,
    LEGEND = 166,
    LI = 167,
    LINK = 168,
    MAP = 169,
    MARK = 170,
    MENU = 171,
    META = 172,
    METER = 173,
    NAV = 174,
    NOFRAMES = 175,
    NOSCRIPT = 176,
    OBJECT = 177,
    OL = 178,
    OPTGROUP = 179,
    OPTION = 180,
    P = 181,
    PARAM = 182,
    PRE = 183,
    PROGRESS = 184,
    Q = 185,
    RP = 186,
    RT = 187,
    RUBY = 188,
    S = 189,
    SAMP = 190,
    SECTION = 191,
    SELECT = 192,
    SMALL = 193,
    SOURCE = 194,
    SPAN = 195,
    STRIKE = 196,
    STRONG = 197,
    SUB = 198,
    SUMMARY = 199,
    SUP = 200,
    TABLE = 201,
    TBODY = 202,
    TD = 203,
    TFOOT = 204,
    TH = 205,
    THEAD = 206,
    TIME = 207,
    TITLE = 208,
    TR = 209,
    TRACK = 210,
    TT = 211,
    U = 212,
    UL = 213,
    VAR = 214,
    VIDEO = 215,
    WBR = 216,
}

impl TagType {
    /// Tag names that could not be classified
    pub const UNKNOWN: TagType = TagType(0);
    /// First code available to caller-defined tag types
    pub const USER: TagType = TagType(300);

    /// Numeric code
    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }

    /// True for everything except [`TagType::UNKNOWN`]
    #[inline]
    pub const fn is_known(self) -> bool {
        self.0 != 0
    }

    /// True for SCRIPT, STYLE and TEXTAREA, whose bodies are raw text
    #[inline]
    pub const fn is_raw_text(self) -> bool {
        matches!(self.0, 1..=3)
    }

    /// True for codes in the caller-defined band
    #[inline]
    pub const fn is_user(self) -> bool {
        self.0 >= Self::USER.0
    }

    /// Upper-case name of a built-in tag type
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .binary_search_by_key(&self, |&(_, tag)| tag)
            .ok()
            .map(|i| NAMED[i].0)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if *self == TagType::UNKNOWN => f.write_str("UNKNOWN"),
            None => write!(f, "TAG#{}", self.0),
        }
    }
}

impl From<TagType> for u16 {
    fn from(tag: TagType) -> u16 {
        tag.0
    }
}

/// No built-in name is longer than this
const MAX_NAME_LEN: usize = 16;

/// Static mapping from tag name to [`TagType`]
pub struct TagVocabulary;

impl TagVocabulary {
    /// Table sorted by name, built on first use
    fn table() -> &'static [(&'static str, TagType)] {
        static TABLE: OnceLock<Vec<(&'static str, TagType)>> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut table = NAMED.to_vec();
            table.sort_unstable_by_key(|&(name, _)| name);
            table
        })
    }

    /// Case-insensitive lookup; unmapped names give [`TagType::UNKNOWN`]
    pub fn lookup(name: &[u8]) -> TagType {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return TagType::UNKNOWN;
        }
        let mut buf = [0u8; MAX_NAME_LEN];
        let upper = &mut buf[..name.len()];
        upper.copy_from_slice(name);
        upper.make_ascii_uppercase();

        let table = Self::table();
        match table.binary_search_by(|&(entry, _)| entry.as_bytes().cmp(upper)) {
            Ok(i) => table[i].1,
            Err(_) => TagType::UNKNOWN,
        }
    }

    /// Raw-text tag type for a name, independent of any classification hook
    pub fn raw_text(name: &[u8]) -> Option<TagType> {
        if name.eq_ignore_ascii_case(b"script") {
            Some(TagType::SCRIPT)
        } else if name.eq_ignore_ascii_case(b"style") {
            Some(TagType::STYLE)
        } else if name.eq_ignore_ascii_case(b"textarea") {
            Some(TagType::TEXTAREA)
        } else {
            None
        }
    }

    /// All (name, code) pairs, sorted by name
    pub fn entries() -> impl Iterator<Item = (&'static str, TagType)> {
        Self::table().iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(TagType::UNKNOWN.code(), 0);
        assert_eq!(TagType::SCRIPT.code(), 1);
        assert_eq!(TagType::STYLE.code(), 2);
        assert_eq!(TagType::TEXTAREA.code(), 3);
        assert_eq!(TagType::A.code(), 101);
        assert_eq!(TagType::DIV.code(), 133);
        assert_eq!(TagType::IMG.code(), 159);
        assert_eq!(TagType::WBR.code(), 216);
        assert_eq!(TagType::USER.code(), 300);
        assert_eq!(NodeKind::StartTag.code(), 1);
        assert_eq!(NodeKind::Unknown.code(), 5);
        assert_eq!(NodeKind::USER, 10);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(TagVocabulary::lookup(b"a"), TagType::A);
        assert_eq!(TagVocabulary::lookup(b"Img"), TagType::IMG);
        assert_eq!(TagVocabulary::lookup(b"BLOCKQUOTE"), TagType::BLOCKQUOTE);
        assert_eq!(TagVocabulary::lookup(b"h1"), TagType::H1);
        assert_eq!(TagVocabulary::lookup(b"script"), TagType::SCRIPT);
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(TagVocabulary::lookup(b"foo"), TagType::UNKNOWN);
        assert_eq!(TagVocabulary::lookup(b""), TagType::UNKNOWN);
        assert_eq!(TagVocabulary::lookup(b"averyveryverylongtagname"), TagType::UNKNOWN);
    }

    #[test]
    fn test_every_named_code_resolves_back() {
        for (name, tag) in TagVocabulary::entries() {
            assert_eq!(TagVocabulary::lookup(name.as_bytes()), tag);
            assert_eq!(tag.name(), Some(name));
        }
        assert_eq!(TagVocabulary::entries().count(), 119);
    }

    #[test]
    fn test_named_is_in_code_order() {
        assert!(NAMED.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn test_display() {
        assert_eq!(TagType::TITLE.to_string(), "TITLE");
        assert_eq!(TagType::UNKNOWN.to_string(), "UNKNOWN");
        assert_eq!(TagType(301).to_string(), "TAG#301");
    }

    #[test]
    fn test_raw_text() {
        assert_eq!(TagVocabulary::raw_text(b"STYLE"), Some(TagType::STYLE));
        assert_eq!(TagVocabulary::raw_text(b"TextArea"), Some(TagType::TEXTAREA));
        assert_eq!(TagVocabulary::raw_text(b"scripts"), None);
        assert!(TagType::SCRIPT.is_raw_text());
        assert!(!TagType::A.is_raw_text());
    }
}
