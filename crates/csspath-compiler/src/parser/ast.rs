//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens in the parser.

use csspath_core::{AttrCase, AttrOperator};
use rowan::{TextRange, TextSize};

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            pub fn text_range(&self) -> TextRange {
                self.0.text_range()
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Selector, Selector);
ast_node!(Compound, Compound);
ast_node!(Combinator, Combinator);
ast_node!(TypeSelector, TypeSelector);
ast_node!(IdSelector, IdSelector);
ast_node!(ClassSelector, ClassSelector);
ast_node!(AttributeSelector, AttributeSelector);
ast_node!(PseudoClass, PseudoClass);
ast_node!(PseudoElement, PseudoElement);
ast_node!(PseudoArgs, PseudoArgs);

/// Direct child of a `Selector`, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorPart {
    Compound(Compound),
    Combinator(Combinator),
}

/// Everything a compound may hold after its type selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SubclassSelector {
    Id(IdSelector),
    Class(ClassSelector),
    Attribute(AttributeSelector),
    PseudoClass(PseudoClass),
    PseudoElement(PseudoElement),
}

impl SubclassSelector {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IdSelector => IdSelector::cast(node).map(Self::Id),
            SyntaxKind::ClassSelector => ClassSelector::cast(node).map(Self::Class),
            SyntaxKind::AttributeSelector => AttributeSelector::cast(node).map(Self::Attribute),
            SyntaxKind::PseudoClass => PseudoClass::cast(node).map(Self::PseudoClass),
            SyntaxKind::PseudoElement => PseudoElement::cast(node).map(Self::PseudoElement),
            _ => None,
        }
    }
}

impl Root {
    pub fn selectors(&self) -> impl Iterator<Item = Selector> + '_ {
        self.0.children().filter_map(Selector::cast)
    }
}

impl Selector {
    /// Error nodes (dropped combinators, stray tokens) are skipped.
    pub fn parts(&self) -> impl Iterator<Item = SelectorPart> + '_ {
        self.0.children().filter_map(|node| match node.kind() {
            SyntaxKind::Compound => Compound::cast(node).map(SelectorPart::Compound),
            SyntaxKind::Combinator => Combinator::cast(node).map(SelectorPart::Combinator),
            _ => None,
        })
    }

    pub fn compounds(&self) -> impl Iterator<Item = Compound> + '_ {
        self.0.children().filter_map(Compound::cast)
    }
}

impl Combinator {
    /// A combinator node without a token is whitespace, i.e. descendant.
    pub fn kind(&self) -> csspath_core::Combinator {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find_map(|t| match t.kind() {
                SyntaxKind::Greater => Some(csspath_core::Combinator::Child),
                SyntaxKind::Plus => Some(csspath_core::Combinator::AdjacentSibling),
                SyntaxKind::Tilde => Some(csspath_core::Combinator::GeneralSibling),
                _ => None,
            })
            .unwrap_or(csspath_core::Combinator::Descendant)
    }
}

impl Compound {
    pub fn type_selector(&self) -> Option<TypeSelector> {
        self.0.children().find_map(TypeSelector::cast)
    }

    pub fn subclasses(&self) -> impl Iterator<Item = SubclassSelector> + '_ {
        self.0.children().filter_map(SubclassSelector::cast)
    }
}

impl TypeSelector {
    /// `*` or the element name as written.
    pub fn name(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Ident | SyntaxKind::Star))
            .map(|t| unescape(t.text()))
            .unwrap_or_default()
    }
}

impl IdSelector {
    pub fn name(&self) -> Option<String> {
        joined_name(&self.0)
    }
}

impl ClassSelector {
    pub fn name(&self) -> Option<String> {
        joined_name(&self.0)
    }
}

/// Text of every name token after the leading sigil, joined.
fn joined_name(node: &SyntaxNode) -> Option<String> {
    let name: String = node
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .filter(|t| {
            matches!(
                t.kind(),
                SyntaxKind::Ident | SyntaxKind::Number | SyntaxKind::Minus
            )
        })
        .map(|t| unescape(t.text()))
        .collect();
    (!name.is_empty()).then_some(name)
}

impl AttributeSelector {
    pub fn name(&self) -> Option<String> {
        self.child_node(SyntaxKind::AttrName)
            .and_then(|n| first_token(&n, SyntaxKind::Ident))
            .map(|t| unescape(t.text()))
    }

    pub fn operator(&self) -> Option<AttrOperator> {
        let matcher = self.child_node(SyntaxKind::AttrMatcher)?;
        let token = matcher
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())?;
        AttrOperator::from_symbol(token.text())
    }

    /// Decoded value: quotes stripped and CSS escapes resolved.
    pub fn value(&self) -> Option<String> {
        let value = self.child_node(SyntaxKind::AttrValue)?;
        if let Some(string) = value.children().find(|n| n.kind() == SyntaxKind::Str) {
            let raw = first_token(&string, SyntaxKind::StrVal)
                .map(|t| t.text().to_string())
                .unwrap_or_default();
            return Some(unescape(&raw));
        }
        let raw: String = value
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .collect();
        Some(unescape(&raw))
    }

    pub fn case(&self) -> AttrCase {
        let modifier = self
            .child_node(SyntaxKind::AttrModifier)
            .and_then(|n| first_token(&n, SyntaxKind::Ident));
        match modifier {
            Some(t) if t.text().eq_ignore_ascii_case("i") => AttrCase::Insensitive,
            _ => AttrCase::Sensitive,
        }
    }

    fn child_node(&self, kind: SyntaxKind) -> Option<SyntaxNode> {
        self.0.children().find(|n| n.kind() == kind)
    }
}

impl PseudoClass {
    pub fn name(&self) -> Option<String> {
        pseudo_name(&self.0)
    }

    pub fn args(&self) -> Option<PseudoArgs> {
        self.0.children().find_map(PseudoArgs::cast)
    }
}

impl PseudoElement {
    pub fn name(&self) -> Option<String> {
        pseudo_name(&self.0)
    }

    pub fn args(&self) -> Option<PseudoArgs> {
        self.0.children().find_map(PseudoArgs::cast)
    }
}

/// Lowercased: pseudo names are ASCII case-insensitive.
fn pseudo_name(node: &SyntaxNode) -> Option<String> {
    first_token(node, SyntaxKind::Ident).map(|t| unescape(t.text()).to_ascii_lowercase())
}

impl PseudoArgs {
    /// Raw text between the parentheses, with the offset where it starts.
    pub fn inner(&self) -> (String, TextSize) {
        let text = self.0.text().to_string();
        let start = self.0.text_range().start();
        let body = text.strip_prefix('(').unwrap_or(&text);
        let body = body.strip_suffix(')').unwrap_or(body);
        let offset = if text.starts_with('(') {
            start + TextSize::from(1)
        } else {
            start
        };
        (body.to_string(), offset)
    }
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

/// Resolves CSS escapes: `\` + up to six hex digits (one trailing space
/// swallowed), or `\` + any other character taken literally.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            if let Some(next) = chars.next() {
                out.push(next);
            }
            continue;
        }

        if chars.peek() == Some(&' ') {
            chars.next();
        }
        let decoded = u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        out.push(decoded);
    }

    out
}
