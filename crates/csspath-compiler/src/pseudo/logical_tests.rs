use rowan::TextSize;

use super::compile_pseudo;
use crate::compile::Translator;
use crate::diagnostics::DiagnosticKind;
use crate::dispatch::CompileOptions;

fn pseudo(name: &str, argument: &str) -> String {
    compile_pseudo(name, Some(argument), "*", &CompileOptions::default()).unwrap()
}

const ACTIVE: &str = r#"contains(concat(" ", normalize-space(@class), " "), " active ")"#;

#[test]
fn not_negates_each_condition() {
    assert_eq!(pseudo("not", ".active"), format!("[not({ACTIVE})]"));
    insta::assert_snapshot!(
        pseudo("not", "#main, [hidden]"),
        @r#"[not(@id="main") and not(@hidden)]"#
    );
}

#[test]
fn not_with_only_a_tag_compiles_to_nothing() {
    let options = CompileOptions::default();
    let mut translator = Translator::new(&options);
    let xpath = translator.translate("div:not(p)", TextSize::from(0)).unwrap();

    assert_eq!(xpath, "//div");
    assert_eq!(
        translator.warnings().kinds(),
        vec![DiagnosticKind::UnsupportedNegation]
    );
}

#[test]
fn not_warns_about_pseudo_classes() {
    let options = CompileOptions::default();
    let mut translator = Translator::new(&options);
    let xpath = translator
        .translate("li:not(.active:first-child)", TextSize::from(0))
        .unwrap();

    assert_eq!(xpath, format!("//li[not({ACTIVE})]"));
    insta::assert_snapshot!(
        translator.warnings().to_string(),
        @"warning at 7..26: unsupported negation: pseudo-class `:first-child` inside `:not()` (hint: `:not()` only negates id, class and attribute conditions)"
    );
}

#[test]
fn not_rejects_complex_selectors() {
    let diagnostics =
        compile_pseudo("not", Some("div p"), "*", &CompileOptions::default()).unwrap_err();
    assert_eq!(
        diagnostics.kinds(),
        vec![DiagnosticKind::InvalidPseudoArgument]
    );
}

#[test]
fn not_requires_an_argument() {
    let diagnostics = compile_pseudo("not", None, "*", &CompileOptions::default()).unwrap_err();
    insta::assert_snapshot!(
        diagnostics.to_string(),
        @"error at 0..0: invalid argument for `:not` (hint: expected a selector list)"
    );
}

#[test]
fn has_relative_paths() {
    assert_eq!(pseudo("has", "img"), "[.//img]");
    assert_eq!(pseudo("has", "> img"), "[./img]");
    assert_eq!(pseudo("has", "~ h2"), "[following-sibling::h2]");
    assert_eq!(pseudo("has", "+ h2"), "[following-sibling::h2[1]]");
    assert_eq!(pseudo("has", "div p"), "[.//div//p]");
    assert_eq!(pseudo("has", "img, > span"), "[.//img | ./span]");
}

#[test]
fn has_adjacent_limits_only_the_first_step() {
    insta::assert_snapshot!(
        pseudo("has", "+ p.active"),
        @r#"[following-sibling::p[1][contains(concat(" ", normalize-space(@class), " "), " active ")]]"#
    );
}

#[test]
fn has_reports_nested_errors_at_their_position() {
    let options = CompileOptions::default();
    let mut translator = Translator::new(&options);
    let diagnostics = translator
        .translate("div:has(> a[)", TextSize::from(0))
        .unwrap_err();

    assert!(diagnostics.kinds().contains(&DiagnosticKind::UnclosedBracket));
    let first = diagnostics.iter().next().unwrap();
    assert!(u32::from(first.range().start()) >= 10);
}

#[test]
fn nesting_depth_is_limited() {
    let source = "div:has(span:has(b))";

    let options = CompileOptions::default();
    let mut translator = Translator::new(&options);
    assert_eq!(
        translator.translate(source, TextSize::from(0)).unwrap(),
        "//div[.//span[.//b]]"
    );

    let options = CompileOptions::default().with_recursion_limit(1);
    let mut translator = Translator::new(&options);
    let diagnostics = translator.translate(source, TextSize::from(0)).unwrap_err();
    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::NestingTooDeep]);
    insta::assert_snapshot!(
        diagnostics.to_string(),
        @"error at 17..18: selector nested too deeply: limit is 1"
    );
}

#[test]
fn is_matches_any_item() {
    assert_eq!(pseudo("is", "h1, h2"), "[(self::h1) or (self::h2)]");
    assert_eq!(pseudo("is", ".active"), format!("[{ACTIVE}]"));
    assert_eq!(pseudo("where", "*"), "[true()]");
    assert_eq!(
        pseudo("matches", "a:first-child"),
        "[self::a and (not(preceding-sibling::*))]"
    );
}

#[test]
fn is_parenthesizes_disjunctions() {
    insta::assert_snapshot!(
        pseudo("any", "[lang|=en]"),
        @r#"[(@lang="en" or starts-with(@lang, "en-"))]"#
    );
}

#[test]
fn is_with_tag_and_class() {
    insta::assert_snapshot!(
        pseudo("is", "p.active, #x"),
        @r#"[(self::p and contains(concat(" ", normalize-space(@class), " "), " active ")) or (@id="x")]"#
    );
}
