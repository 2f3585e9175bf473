#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for csspath selectors.
//!
//! A selector is compiled segment by segment. Each [`Segment`] is either a
//! compound CSS step joined to its predecessor by a [`Combinator`], or a raw
//! XPath literal that bypasses CSS parsing entirely.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// Expression Types
// ============================================================================

/// How an input expression should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionType {
    #[default]
    Css,
    Xpath,
    Regex,
}

impl ExpressionType {
    pub const ALL: [ExpressionType; 3] = [Self::Css, Self::Xpath, Self::Regex];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Xpath => "xpath",
            Self::Regex => "regex",
        }
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an expression type name is not one of `css`, `xpath`, `regex`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown expression type `{0}`")]
pub struct UnknownExpressionType(pub String);

impl FromStr for ExpressionType {
    type Err = UnknownExpressionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "xpath" => Ok(Self::Xpath),
            "regex" => Ok(Self::Regex),
            _ => Err(UnknownExpressionType(s.to_string())),
        }
    }
}

// ============================================================================
// Segments
// ============================================================================

/// Structural relation of a compound to the compound before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Combinator {
    /// First compound of a selector.
    #[default]
    None,
    /// Whitespace.
    Descendant,
    /// `>`
    Child,
    /// `+`
    AdjacentSibling,
    /// `~`
    GeneralSibling,
}

impl Combinator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(Self::Child),
            '+' => Some(Self::AdjacentSibling),
            '~' => Some(Self::GeneralSibling),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Descendant => " ",
            Self::Child => ">",
            Self::AdjacentSibling => "+",
            Self::GeneralSibling => "~",
        }
    }
}

/// Attribute matching operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttrOperator {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
}

impl AttrOperator {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Self::Equals),
            "!=" => Some(Self::NotEquals),
            "^=" => Some(Self::Prefix),
            "$=" => Some(Self::Suffix),
            "*=" => Some(Self::Substring),
            "~=" => Some(Self::Includes),
            "|=" => Some(Self::DashMatch),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
            Self::Substring => "*=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
        }
    }
}

/// Case sensitivity modifier of an attribute selector (`[a="b" i]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttrCase {
    #[default]
    Sensitive,
    Insensitive,
}

/// `[name op "value"]`. `operator` and `value` are either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeSelector {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<AttrOperator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "is_sensitive")]
    pub case: AttrCase,
}

fn is_sensitive(case: &AttrCase) -> bool {
    *case == AttrCase::Sensitive
}

impl AttributeSelector {
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: None,
            value: None,
            case: AttrCase::Sensitive,
        }
    }

    pub fn matching(name: impl Into<String>, operator: AttrOperator, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator: Some(operator),
            value: Some(value.into()),
            case: AttrCase::Sensitive,
        }
    }

    pub fn with_case(mut self, case: AttrCase) -> Self {
        self.case = case;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PseudoKind {
    /// `:name`
    Class,
    /// `::name`, or a legacy single-colon pseudo-element such as `:before`.
    Element,
}

/// A pseudo-class or pseudo-element with its raw, untrimmed argument text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pseudo {
    pub kind: PseudoKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub argument: Option<String>,
}

impl Pseudo {
    pub fn class(name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            kind: PseudoKind::Class,
            name: name.into(),
            argument,
        }
    }

    pub fn element(name: impl Into<String>, argument: Option<String>) -> Self {
        Self {
            kind: PseudoKind::Element,
            name: name.into(),
            argument,
        }
    }
}

/// The universal tag.
pub const ANY_TAG: &str = "*";

/// One compound selector step: `div#main.a.b[href]:first-child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compound {
    pub combinator: Combinator,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeSelector>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pseudo_classes: Vec<Pseudo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_element: Option<Pseudo>,
}

impl Default for Compound {
    fn default() -> Self {
        Self {
            combinator: Combinator::None,
            tag: ANY_TAG.to_string(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            pseudo_classes: Vec::new(),
            pseudo_element: None,
        }
    }
}

impl Compound {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    pub fn is_universal(&self) -> bool {
        self.tag == ANY_TAG
    }

    /// Whether the compound is `*` with nothing else attached.
    pub fn is_bare_universal(&self) -> bool {
        self.is_universal()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
            && self.pseudo_element.is_none()
    }
}

/// One step of an assembled selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Compound(Compound),
    /// Raw XPath literal, carried through unchanged.
    Xpath { xpath: String },
}

impl Segment {
    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self::Xpath {
            xpath: xpath.into(),
        }
    }

    pub fn combinator(&self) -> Combinator {
        match self {
            Self::Compound(c) => c.combinator,
            Self::Xpath { .. } => Combinator::None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(c) => Some(c),
            Self::Xpath { .. } => None,
        }
    }
}

/// Whether the expression is an absolute (`/`) or descendant (`//`) XPath literal.
pub fn is_xpath_literal(expr: &str) -> bool {
    expr.starts_with('/')
}
