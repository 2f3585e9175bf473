//! Syntax kinds for CSS selectors.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `CssLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token(",")]
    Comma,

    /// Child combinator
    #[token(">")]
    Greater,

    /// Adjacent-sibling combinator
    #[token("+")]
    Plus,

    /// General-sibling combinator
    #[token("~")]
    Tilde,

    #[token("*")]
    Star,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    /// `::` for pseudo-elements. Longest match wins over `Colon`.
    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("!=")]
    NotEquals,

    #[token("^=")]
    CaretEquals,

    #[token("$=")]
    DollarEquals,

    #[token("*=")]
    StarEquals,

    #[token("~=")]
    TildeEquals,

    #[token("|=")]
    PipeEquals,

    #[token("|")]
    Pipe,

    #[token("-")]
    Minus,

    /// Quoted string on a single line
    #[regex(r#""(?:[^"\\\r\n\x0c]|\\.)*""#)]
    #[regex(r"'(?:[^'\\\r\n\x0c]|\\.)*'")]
    #[doc(hidden)]
    StringLiteral, // Lexer-internal only

    DoubleQuote,
    SingleQuote,
    /// String content between quotes
    StrVal,
    /// Quote with no matching close, up to the end of the line
    UnclosedString,

    #[regex(r"[0-9]+(?:\.[0-9]+)?")]
    Number,

    /// CSS identifier, including custom-property style `--x`, non-ASCII names
    /// and escapes: `\:` for a literal character, `\31 ` for a code point.
    #[regex(
        r"-{0,2}(?:[a-zA-Z_\u{80}-\u{10FFFF}]|\\[0-9a-fA-F]{1,6} ?|\\[^\r\n\x0c0-9a-fA-F])(?:[a-zA-Z0-9_\-\u{80}-\u{10FFFF}]|\\[0-9a-fA-F]{1,6} ?|\\[^\r\n\x0c0-9a-fA-F])*",
        allow_greedy = true
    )]
    Ident,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Node kinds (non-terminals) ---
    Root,
    Selector,
    Compound,
    Combinator,
    TypeSelector,
    IdSelector,
    ClassSelector,
    AttributeSelector,
    AttrName,
    AttrMatcher,
    AttrValue,
    AttrModifier,
    PseudoClass,
    PseudoElement,
    PseudoArgs,
    Str,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage | UnclosedString)
    }

    #[inline]
    pub fn is_combinator(self) -> bool {
        matches!(self, Greater | Plus | Tilde)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CssLang {}

impl Language for CssLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<CssLang>;
pub type SyntaxToken = rowan::SyntaxToken<CssLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 64-bit bitset of `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

impl TokenSet {
    /// Panics at compile time if any kind's discriminant >= 64.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u64;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 64, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 64 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..64u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: bounds checked against __LAST above
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Tokens that can start a compound selector.
    pub const COMPOUND_FIRST: TokenSet =
        TokenSet::new(&[Ident, Star, Hash, Dot, BracketOpen, Colon, DoubleColon]);

    /// Tokens that continue a compound after its type selector.
    pub const SUBCLASS_FIRST: TokenSet =
        TokenSet::new(&[Hash, Dot, BracketOpen, Colon, DoubleColon]);

    pub const COMBINATORS: TokenSet = TokenSet::new(&[Greater, Plus, Tilde]);

    /// A selector may open with a (dangling) combinator.
    pub const SELECTOR_FIRST: TokenSet = COMPOUND_FIRST.union(COMBINATORS);

    pub const TYPE_FIRST: TokenSet = TokenSet::new(&[Ident, Star]);

    pub const ATTR_MATCHERS: TokenSet = TokenSet::new(&[
        Equals,
        NotEquals,
        CaretEquals,
        DollarEquals,
        StarEquals,
        TildeEquals,
        PipeEquals,
    ]);

    /// Where an attribute selector gives up skipping garbage.
    pub const ATTR_RECOVERY: TokenSet = TokenSet::new(&[BracketClose]);

    pub const ATTR_NAME_RECOVERY: TokenSet = ATTR_RECOVERY.union(ATTR_MATCHERS);

    /// Tokens that end an unquoted attribute value.
    pub const ATTR_VALUE_STOP: TokenSet =
        TokenSet::new(&[BracketClose, BracketOpen, DoubleQuote, SingleQuote]);
}
