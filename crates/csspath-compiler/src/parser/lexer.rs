//! Lexer for CSS selectors.
//!
//! Tokens are spans only; text is sliced from the source on demand.
//!
//! Two CSS tokenization rules are applied on top of the Logos output:
//!
//! - A string missing its closing quote becomes one `UnclosedString` token that
//!   runs to the end of the line, like a CSS bad-string. The parser reports it
//!   once instead of tripping over whatever the string swallowed.
//! - Characters that start no token are merged with adjacent ones into a
//!   single `Garbage` token.
//!
//! Escapes (`\:`, `\31 `) are part of identifiers here and decoded by the AST.

use logos::Logos;
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::cst::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn offset(at: usize) -> TextSize {
    TextSize::from(at as u32)
}

fn text_range(range: Range<usize>) -> TextRange {
    TextRange::new(offset(range.start), offset(range.end))
}

/// Tokenizes a selector into span-based tokens.
///
/// Quoted strings come out as quote + `StrVal` + quote, with `StrVal` omitted
/// for `""`.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(SyntaxKind::StringLiteral) => push_string(source, span, &mut tokens),
            Ok(kind) => tokens.push(Token::new(kind, text_range(span))),
            Err(()) if source[span.start..].starts_with(['"', '\'']) => {
                let end = unclosed_string_end(source, span.start).max(span.end);
                lexer.bump(end - span.end);
                tokens.push(Token::new(
                    SyntaxKind::UnclosedString,
                    text_range(span.start..end),
                ));
            }
            Err(()) => push_garbage(span, &mut tokens),
        }
    }

    tokens
}

/// `"text"` as quote + content + quote.
fn push_string(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let quote = if source[span.clone()].starts_with('"') {
        SyntaxKind::DoubleQuote
    } else {
        SyntaxKind::SingleQuote
    };
    let Range { start, end } = span;

    tokens.push(Token::new(quote, text_range(start..start + 1)));
    if end - start > 2 {
        tokens.push(Token::new(
            SyntaxKind::StrVal,
            text_range(start + 1..end - 1),
        ));
    }
    tokens.push(Token::new(quote, text_range(end - 1..end)));
}

/// End of a string opened at `start` that never closes: the first unescaped
/// line break, or the end of input.
fn unclosed_string_end(source: &str, start: usize) -> usize {
    let mut chars = source[start..].char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' | '\r' | '\x0c' => return start + i,
            _ => {}
        }
    }
    source.len()
}

fn push_garbage(span: Range<usize>, tokens: &mut Vec<Token>) {
    if let Some(last) = tokens.last_mut() {
        if last.kind == SyntaxKind::Garbage && last.span.end() == offset(span.start) {
            last.span = TextRange::new(last.span.start(), offset(span.end));
            return;
        }
    }
    tokens.push(Token::new(SyntaxKind::Garbage, text_range(span)));
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[Range::<usize>::from(token.span)]
}
