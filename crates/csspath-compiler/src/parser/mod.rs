//! Parser infrastructure for CSS selectors.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder:
//!
//! - Zero-copy lexing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace is collected, then attached as leading trivia,
//!   or wrapped into a `Combinator` node when it is the descendant combinator
//! - Checkpoint-based wrapping: a pseudo is typed as class or element once its name is known
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree.
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume
//! 3. An attribute selector skips to its `]`; pseudo arguments run to their matching `)`

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;

#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    AttributeSelector, ClassSelector, Combinator, Compound, IdSelector, PseudoArgs, PseudoClass,
    PseudoElement, Root, Selector, SelectorPart, SubclassSelector, TypeSelector,
};

pub use core::Parser;

use std::fmt::Write;

use crate::diagnostics::Diagnostics;
use lexer::lex;

/// Parse result containing the green tree.
///
/// The tree is always complete; diagnostics are returned separately.
#[derive(Debug, Clone)]
pub struct Parse {
    cst: rowan::GreenNode,
}

impl Parse {
    pub fn as_cst(&self) -> &rowan::GreenNode {
        &self.cst
    }

    /// Creates a typed view over the immutable green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.cst.clone())
    }

    pub fn root(&self) -> Root {
        Root::cast(self.syntax()).expect("parser always produces a Root")
    }

    /// Indented tree dump, one node or token per line, whitespace omitted.
    pub fn dump_cst(&self) -> String {
        let mut out = String::new();
        format_cst(&self.syntax(), 0, &mut out).expect("String write never fails");
        out
    }
}

fn format_cst(node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
    let prefix = "  ".repeat(indent);
    writeln!(w, "{}{:?}", prefix, node.kind())?;

    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => format_cst(&n, indent + 1, w)?,
            rowan::NodeOrToken::Token(t) => {
                if t.kind().is_trivia() {
                    continue;
                }
                writeln!(w, "{}  {:?} {:?}", prefix, t.kind(), t.text())?;
            }
        }
    }
    Ok(())
}

/// Main entry point: lex and parse one selector (or selector list).
pub fn parse(source: &str) -> (Parse, Diagnostics) {
    let mut parser = Parser::new(source, lex(source));
    parser.parse_root();
    let (cst, diagnostics) = parser.finish();
    (Parse { cst }, diagnostics)
}
