//! Embedding literal values into XPath 1.0.

use crate::dispatch::LiteralQuoting;

/// XPath string literal for `value`.
///
/// XPath 1.0 has no escape sequences, so under [`LiteralQuoting::Escaped`] a
/// value with both quote kinds is spelled as `concat("a", '"', "b")`.
pub fn quote(value: &str, quoting: LiteralQuoting) -> String {
    match quoting {
        LiteralQuoting::Verbatim => format!("\"{value}\""),
        LiteralQuoting::Escaped => escaped(value),
    }
}

fn escaped(value: &str) -> String {
    if !value.contains('"') {
        return format!("\"{value}\"");
    }
    if !value.contains('\'') {
        return format!("'{value}'");
    }

    let mut parts = Vec::new();
    for (i, piece) in value.split('"').enumerate() {
        if i > 0 {
            parts.push("'\"'".to_string());
        }
        if !piece.is_empty() {
            parts.push(format!("\"{piece}\""));
        }
    }
    format!("concat({})", parts.join(", "))
}

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// `translate(expr, "A..Z", "a..z")`: ASCII lower-casing, the best XPath 1.0 offers.
pub fn lowercased(expr: &str) -> String {
    format!("translate({expr}, \"{UPPERCASE}\", \"{LOWERCASE}\")")
}
