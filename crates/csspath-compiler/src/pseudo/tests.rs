use super::{PseudoRegistry, compile_pseudo, registry};
use crate::diagnostics::DiagnosticKind;
use crate::dispatch::{CompileOptions, LiteralQuoting};

fn pseudo(name: &str, argument: Option<&str>) -> String {
    compile_pseudo(name, argument, "*", &CompileOptions::default()).unwrap()
}

#[test]
fn builtin_registry_covers_every_family() {
    let registry = registry();
    assert!(registry.len() > 100);
    for name in [
        "first-child",
        "nth-of-type",
        "eq",
        "slice",
        "not",
        "has",
        "contains",
        "checked",
        "visible",
        "heading",
    ] {
        assert!(registry.contains(name), "{name}");
    }
}

#[test]
fn registry_names_are_unique() {
    let names: Vec<&str> = registry().names().collect();
    let mut deduped = names.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(names.len(), deduped.len());
}

#[test]
fn custom_registration_replaces() {
    let mut registry = PseudoRegistry::default();
    assert!(registry.is_empty());

    registry.register("x", |_| Ok("[1]".to_string()));
    registry.register("x", |_| Ok("[2]".to_string()));
    assert_eq!(registry.len(), 1);

    let handler = registry.get("x").unwrap();
    let options = CompileOptions::default();
    let mut translator = crate::compile::Translator::new(&options);
    let mut ctx = super::PseudoContext::new(
        &mut translator,
        "x",
        None,
        rowan::TextRange::default(),
        "*",
    );
    assert_eq!(handler(&mut ctx).unwrap(), "[2]");
}

#[test]
fn unknown_pseudo_class_is_empty() {
    assert_eq!(pseudo("no-such-thing", None), "");
}

#[test]
fn names_are_case_insensitive() {
    assert_eq!(pseudo("FIRST-CHILD", None), "[not(preceding-sibling::*)]");
}

#[test]
fn structural() {
    assert_eq!(pseudo("root", None), "[not(parent::*)]");
    assert_eq!(pseudo("empty", None), "[not(*) and not(text())]");
    assert_eq!(pseudo("last-child", None), "[not(following-sibling::*)]");
    assert_eq!(
        pseudo("only-child", None),
        "[not(preceding-sibling::*) and not(following-sibling::*)]"
    );

    let options = CompileOptions::default();
    assert_eq!(
        compile_pseudo("first-of-type", None, "li", &options).unwrap(),
        "[not(preceding-sibling::li)]"
    );
    assert_eq!(
        compile_pseudo("only-of-type", None, "li", &options).unwrap(),
        "[not(preceding-sibling::li) and not(following-sibling::li)]"
    );
}

#[test]
fn positional() {
    assert_eq!(pseudo("first", None), "[position() = 1]");
    assert_eq!(pseudo("last", None), "[position() = last()]");
    assert_eq!(pseudo("even", None), "[position() mod 2 = 1]");
    assert_eq!(pseudo("odd", None), "[position() mod 2 = 0]");
    assert_eq!(pseudo("eq", Some("0")), "[position() = 1]");
    assert_eq!(pseudo("eq", Some("-1")), "[position() = last()]");
    assert_eq!(pseudo("eq", Some("-3")), "[position() = last() - 2]");
    assert_eq!(pseudo("gt", Some("1")), "[position() > 2]");
    assert_eq!(pseudo("lt", Some(" 3 ")), "[position() < 4]");
}

#[test]
fn positional_negative_indices_count_from_the_end() {
    assert_eq!(pseudo("gt", Some("-1")), "[position() > last()]");
    assert_eq!(pseudo("gt", Some("-3")), "[position() > last() - 2]");
    assert_eq!(pseudo("lt", Some("-1")), "[position() < last()]");
    assert_eq!(pseudo("lt", Some("-2")), "[position() < last() - 1]");
}

#[test]
fn positional_extreme_indices() {
    assert_eq!(
        pseudo("eq", Some("9223372036854775807")),
        "[position() = 9223372036854775808]"
    );
    assert_eq!(
        pseudo("gt", Some("9223372036854775807")),
        "[position() > 9223372036854775808]"
    );
    assert_eq!(
        pseudo("eq", Some("-9223372036854775808")),
        "[position() = last() - 9223372036854775807]"
    );
    assert_eq!(
        pseudo("lt", Some("-9223372036854775808")),
        "[position() < last() - 9223372036854775807]"
    );
}

#[test]
fn positional_rejects_non_integers() {
    let diagnostics =
        compile_pseudo("eq", Some("x"), "*", &CompileOptions::default()).unwrap_err();
    insta::assert_snapshot!(
        diagnostics.to_string(),
        @"error at 0..1: invalid argument for `:eq` (hint: `x` is not an integer index)"
    );

    let diagnostics = compile_pseudo("gt", None, "*", &CompileOptions::default()).unwrap_err();
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::InvalidPseudoArgument]
    );
}

#[test]
fn text_content() {
    assert_eq!(pseudo("contains", Some("Hello")), r#"[contains(., "Hello")]"#);
    assert_eq!(pseudo("contains", Some("'a b'")), r#"[contains(., "a b")]"#);
    assert_eq!(
        pseudo("contains-own", Some("\"x\"")),
        r#"[text()[contains(., "x")]]"#
    );
    assert_eq!(
        pseudo("starts-with", Some("Intro")),
        r#"[starts-with(normalize-space(.), "Intro")]"#
    );
    assert_eq!(
        pseudo("text-equals", Some("Done")),
        r#"[normalize-space(.) = "Done"]"#
    );
    assert_eq!(pseudo("has-text", None), "[normalize-space(.)]");
    assert_eq!(pseudo("no-text", None), "[not(normalize-space(.))]");
    insta::assert_snapshot!(
        pseudo("icontains", Some("HeLLo")),
        @r#"[contains(translate(., "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "abcdefghijklmnopqrstuvwxyz"), "hello")]"#
    );
    insta::assert_snapshot!(
        pseudo("ends-with", Some("!")),
        @r#"[substring(normalize-space(.), string-length(normalize-space(.)) - string-length("!") + 1) = "!"]"#
    );
}

#[test]
fn text_argument_is_required() {
    let diagnostics =
        compile_pseudo("contains", Some("  "), "*", &CompileOptions::default()).unwrap_err();
    insta::assert_snapshot!(
        diagnostics.to_string(),
        @"error at 0..2: invalid argument for `:contains` (hint: expected text)"
    );
}

#[test]
fn text_literals_follow_quoting_option() {
    let options = CompileOptions::default().with_literal_quoting(LiteralQuoting::Escaped);
    assert_eq!(
        compile_pseudo("contains", Some(r#"'say "hi"'"#), "*", &options).unwrap(),
        r#"[contains(., 'say "hi"')]"#
    );
}

#[test]
fn lang() {
    insta::assert_snapshot!(
        pseudo("lang", Some("EN")),
        @r#"[ancestor-or-self::*[@lang][1][translate(@lang, "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "abcdefghijklmnopqrstuvwxyz") = "en" or starts-with(translate(@lang, "ABCDEFGHIJKLMNOPQRSTUVWXYZ", "abcdefghijklmnopqrstuvwxyz"), "en-")]]"#
    );
}

#[test]
fn attribute_presence() {
    assert_eq!(pseudo("has-attr", Some("href")), "[@href]");
    assert_eq!(pseudo("has-attr", Some("@href")), "[@href]");
    assert_eq!(pseudo("no-attr", Some("alt")), "[not(@alt)]");
    assert_eq!(pseudo("data", Some("id")), "[@data-id]");
    assert_eq!(pseudo("data", Some("data-role = 'tab'")), r#"[@data-role="tab"]"#);

    let diagnostics =
        compile_pseudo("has-attr", Some("a b"), "*", &CompileOptions::default()).unwrap_err();
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::InvalidPseudoArgument]
    );
}

#[test]
fn fixed_state_predicates() {
    assert_eq!(pseudo("disabled", None), "[@disabled]");
    assert_eq!(pseudo("checked", None), "[@checked or @selected]");
    assert_eq!(pseudo("hover", None), "[false()]");
    assert_eq!(
        pseudo("password", None),
        r#"[self::input and @type="password"]"#
    );
    assert_eq!(pseudo("list", None), "[self::ul or self::ol or self::dl]");
}

#[test]
fn visibility() {
    insta::assert_snapshot!(
        pseudo("hidden", None),
        @r#"[@hidden or @type="hidden" or contains(translate(@style, " ", ""), "display:none") or contains(translate(@style, " ", ""), "visibility:hidden")]"#
    );
    insta::assert_snapshot!(
        pseudo("visible", None),
        @r#"[not(@hidden) and not(@type="hidden") and not(contains(translate(@style, " ", ""), "display:none")) and not(contains(translate(@style, " ", ""), "visibility:hidden"))]"#
    );
}

#[test]
fn heading_levels() {
    assert_eq!(
        pseudo("heading", None),
        "[self::h1 or self::h2 or self::h3 or self::h4 or self::h5 or self::h6]"
    );
    assert_eq!(pseudo("heading", Some("1, 2")), "[self::h1 or self::h2]");

    let diagnostics =
        compile_pseudo("heading", Some("7"), "*", &CompileOptions::default()).unwrap_err();
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::InvalidPseudoArgument]
    );
}
