//! Attribute selectors to XPath predicates.

use csspath_core::{AttrCase, AttrOperator, AttributeSelector};

use super::literal::{lowercased, quote};
use crate::dispatch::LiteralQuoting;

/// `[condition]` for one attribute selector.
pub fn compile_attribute(attr: &AttributeSelector, quoting: LiteralQuoting) -> String {
    format!("[{}]", attribute_condition(attr, quoting))
}

/// The bare condition, usable inside `not(...)` or combined with `and`/`or`.
pub fn attribute_condition(attr: &AttributeSelector, quoting: LiteralQuoting) -> String {
    let name = format!("@{}", attr.name);
    let (Some(op), Some(value)) = (attr.operator, attr.value.as_deref()) else {
        return name;
    };

    let (subject, value) = match attr.case {
        AttrCase::Sensitive => (name.clone(), value.to_string()),
        AttrCase::Insensitive => (lowercased(&name), value.to_lowercase()),
    };
    let lit = |v: &str| quote(v, quoting);

    match op {
        AttrOperator::Equals => format!("{subject}={}", lit(&value)),
        // A missing attribute never satisfies `!=`, so existence is required.
        AttrOperator::NotEquals => format!("{name} and {subject}!={}", lit(&value)),
        // `^=`, `$=` and `*=` with an empty value never match.
        AttrOperator::Prefix | AttrOperator::Suffix | AttrOperator::Substring
            if value.is_empty() =>
        {
            "false()".to_string()
        }
        AttrOperator::Prefix => format!("starts-with({subject}, {})", lit(&value)),
        AttrOperator::Suffix => {
            let v = lit(&value);
            format!("substring({subject}, string-length({name}) - string-length({v}) + 1)={v}")
        }
        AttrOperator::Substring => format!("contains({subject}, {})", lit(&value)),
        // Whitespace-separated list membership; a value that is empty or
        // holds whitespace can never be one of the tokens.
        AttrOperator::Includes => {
            if value.is_empty() || value.contains(char::is_whitespace) {
                return "false()".to_string();
            }
            format!(
                "contains(concat(\" \", normalize-space({subject}), \" \"), {})",
                lit(&format!(" {value} "))
            )
        }
        AttrOperator::DashMatch => format!(
            "{subject}={} or starts-with({subject}, {})",
            lit(&value),
            lit(&format!("{value}-"))
        ),
    }
}

/// Predicate matching an element carrying class `name`.
pub fn class_condition(name: &str, quoting: LiteralQuoting) -> String {
    format!(
        "contains(concat(\" \", normalize-space(@class), \" \"), {})",
        quote(&format!(" {name} "), quoting)
    )
}

pub fn id_condition(id: &str, quoting: LiteralQuoting) -> String {
    format!("@id={}", quote(id, quoting))
}
