use super::literal::{lowercased, quote};
use crate::dispatch::LiteralQuoting;

#[test]
fn verbatim_always_uses_double_quotes() {
    assert_eq!(quote("plain", LiteralQuoting::Verbatim), r#""plain""#);
    assert_eq!(quote(r#"say "hi""#, LiteralQuoting::Verbatim), r#""say "hi"""#);
}

#[test]
fn escaped_prefers_double_quotes() {
    assert_eq!(quote("it's", LiteralQuoting::Escaped), r#""it's""#);
    assert_eq!(quote("", LiteralQuoting::Escaped), r#""""#);
}

#[test]
fn escaped_falls_back_to_single_quotes() {
    assert_eq!(quote(r#"say "hi""#, LiteralQuoting::Escaped), r#"'say "hi"'"#);
}

#[test]
fn escaped_uses_concat_for_both_quote_kinds() {
    insta::assert_snapshot!(
        quote(r#"it's "x""#, LiteralQuoting::Escaped),
        @r#"concat("it's ", '"', "x", '"')"#
    );
    insta::assert_snapshot!(
        quote(r#""'"#, LiteralQuoting::Escaped),
        @r#"concat('"', "'")"#
    );
}

#[test]
fn lowercased_wraps_in_translate() {
    insta::assert_snapshot!(
        lowercased("@type"),
        @r#"translate(@type, "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "abcdefghijklmnopqrstuvwxyz")"#
    );
}
