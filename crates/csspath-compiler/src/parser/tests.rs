use crate::diagnostics::DiagnosticKind;

use super::parse;

fn dump(source: &str) -> String {
    let (parse, diagnostics) = parse(source);
    assert!(!diagnostics.has_errors(), "{}", diagnostics);
    parse.dump_cst()
}

fn kinds(source: &str) -> Vec<DiagnosticKind> {
    parse(source).1.kinds()
}

#[test]
fn child_combinator() {
    insta::assert_snapshot!(dump("div > p.note"), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "div"
        Combinator
          Greater ">"
        Compound
          TypeSelector
            Ident "p"
          ClassSelector
            Dot "."
            Ident "note"
    "#);
}

#[test]
fn descendant_combinator_is_whitespace_node() {
    insta::assert_snapshot!(dump("ul  li"), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "ul"
        Combinator
        Compound
          TypeSelector
            Ident "li"
    "#);
}

#[test]
fn selector_list() {
    insta::assert_snapshot!(dump("h1, h2"), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "h1"
      Comma ","
      Selector
        Compound
          TypeSelector
            Ident "h2"
    "#);
}

#[test]
fn attribute_with_string_and_modifier() {
    insta::assert_snapshot!(dump(r#"input[type="text" i]"#), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "input"
          AttributeSelector
            BracketOpen "["
            AttrName
              Ident "type"
            AttrMatcher
              Equals "="
            AttrValue
              Str
                DoubleQuote "\""
                StrVal "text"
                DoubleQuote "\""
            AttrModifier
              Ident "i"
            BracketClose "]"
    "#);
}

#[test]
fn pseudo_class_with_arguments() {
    insta::assert_snapshot!(dump("a:not(.x)"), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "a"
          PseudoClass
            Colon ":"
            Ident "not"
            PseudoArgs
              ParenOpen "("
              Dot "."
              Ident "x"
              ParenClose ")"
    "#);
}

#[test]
fn nested_parens_stay_in_one_argument_node() {
    insta::assert_snapshot!(dump("li:has(a:nth-child(2))"), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "li"
          PseudoClass
            Colon ":"
            Ident "has"
            PseudoArgs
              ParenOpen "("
              Ident "a"
              Colon ":"
              Ident "nth-child"
              ParenOpen "("
              Number "2"
              ParenClose ")"
              ParenClose ")"
    "#);
}

#[test]
fn pseudo_elements() {
    insta::assert_snapshot!(dump("p::first-line, p:before"), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "p"
          PseudoElement
            DoubleColon "::"
            Ident "first-line"
      Comma ","
      Selector
        Compound
          TypeSelector
            Ident "p"
          PseudoElement
            Colon ":"
            Ident "before"
    "#);
}

#[test]
fn valid_selectors_have_no_diagnostics() {
    for source in [
        "div",
        "*",
        "#main > ul.nav li:first-child a[href^='http']",
        "tr:nth-child(2n+1) td",
        "h1 ~ p + p",
        "a[data-x], b[data-y]",
        "span::after",
    ] {
        assert!(parse(source).1.is_empty(), "{}", source);
    }
}

#[test]
fn empty_input() {
    assert_eq!(kinds(""), vec![DiagnosticKind::EmptySelector]);
    assert_eq!(kinds("   "), vec![DiagnosticKind::EmptySelector]);
}

#[test]
fn trailing_combinator_is_a_warning() {
    let (parse, diagnostics) = parse("div >");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::DanglingCombinator]);
    assert!(!diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.to_string(), @"warning at 4..5: dangling combinator (hint: the combinator has no compound on one side and is ignored)");
    assert_eq!(parse.root().selectors().count(), 1);
}

#[test]
fn leading_combinator_is_a_warning() {
    let (parse, diagnostics) = parse("> p");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::DanglingCombinator]);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Root
      Selector
        Error
          Greater ">"
        Compound
          TypeSelector
            Ident "p"
    "#);
}

#[test]
fn repeated_combinator_is_a_warning() {
    let (parse, diagnostics) = parse("div > > p");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::RepeatedCombinator]);
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Root
      Selector
        Compound
          TypeSelector
            Ident "div"
        Combinator
          Greater ">"
        Error
          Greater ">"
        Compound
          TypeSelector
            Ident "p"
    "#);
}

#[test]
fn missing_names() {
    assert_eq!(kinds("."), vec![DiagnosticKind::ExpectedClassName]);
    assert_eq!(kinds("div#"), vec![DiagnosticKind::ExpectedIdName]);
    assert_eq!(kinds("a:"), vec![DiagnosticKind::ExpectedPseudoName]);
    assert_eq!(kinds("[=x]"), vec![DiagnosticKind::ExpectedAttributeName]);
    assert_eq!(kinds("[a=]"), vec![DiagnosticKind::ExpectedAttributeValue]);
}

#[test]
fn unclosed_bracket() {
    let (_, diagnostics) = parse("a[href");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnclosedBracket]);
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 1..6: missing closing `]` (fix: insert `]`) (related: `[` opened here at 1..2)");
}

#[test]
fn unclosed_paren() {
    let (_, diagnostics) = parse("li:nth-child(2");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::UnclosedParen]);
}

#[test]
fn unterminated_string() {
    let (_, diagnostics) = parse(r#"[title="abc]"#);
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 7..12: unterminated string");
}

#[test]
fn unterminated_string_in_pseudo_args() {
    assert_eq!(
        kinds(r#"p:contains("abc) > a"#),
        vec![DiagnosticKind::UnterminatedString]
    );
}

#[test]
fn unterminated_string_before_line_break() {
    assert_eq!(
        kinds("[title='abc\n]"),
        vec![DiagnosticKind::UnterminatedString]
    );
}

#[test]
fn misplaced_commas() {
    let (_, diagnostics) = parse("div, ,p");
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::ExpectedSelector]);
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 5..6: expected a selector: before `,`");

    let (_, diagnostics) = parse("div,");
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 4..4: expected a selector: after `,`");
}

#[test]
fn stray_token() {
    let (_, diagnostics) = parse("a)");
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 1..2: unexpected `)`");
}

#[test]
fn type_selector_must_come_first() {
    let (_, diagnostics) = parse("*div");
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 1..4: unexpected `div`, the type selector must start the compound");
}

#[test]
fn junk_inside_attribute_is_skipped_to_bracket() {
    let (parse, diagnostics) = parse("[a b c]");
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 3..4: unexpected `b` in attribute selector");
    insta::assert_snapshot!(parse.dump_cst(), @r#"
    Root
      Selector
        Compound
          AttributeSelector
            BracketOpen "["
            AttrName
              Ident "a"
            Error
              Ident "b"
              Ident "c"
            BracketClose "]"
    "#);
}
