use std::sync::Arc;

use csspath_core::ExpressionType;

use super::{
    CacheEntry, CacheKey, CompileOptions, Compiler, LiteralQuoting, MemoryCache, SelectorCache,
    cache_entries, compile,
};
use crate::Error;
use crate::diagnostics::DiagnosticKind;

fn compiler() -> Compiler {
    Compiler::new().with_cache(Arc::new(MemoryCache::new()))
}

fn css(selector: &str) -> String {
    compiler().compile(selector, ExpressionType::Css).unwrap()
}

fn error_kinds(err: &Error) -> Vec<DiagnosticKind> {
    err.diagnostics().map(|d| d.kinds()).unwrap_or_default()
}

#[test]
fn reference_translations() {
    insta::assert_snapshot!(
        css(".item.active"),
        @r#"//*[contains(concat(" ", normalize-space(@class), " "), " item ")][contains(concat(" ", normalize-space(@class), " "), " active ")]"#
    );
    assert_eq!(css("div > p"), "//div/p");
    assert_eq!(css("ul li:first-child"), "//ul//li[not(preceding-sibling::*)]");
    assert_eq!(css(r#"a[href^="http"]"#), r#"//a[starts-with(@href, "http")]"#);
    assert_eq!(css("div, p"), "//div | //p");
    assert_eq!(
        css("div:not(.active)"),
        r#"//div[not(contains(concat(" ", normalize-space(@class), " "), " active "))]"#
    );
    assert_eq!(css("li:nth-child(odd)"), "//li[position() mod 2 = 1]");
}

#[test]
fn input_is_trimmed() {
    assert_eq!(css("  div > p \n"), "//div/p");
}

#[test]
fn escaped_identifiers_compile_to_their_values() {
    assert_eq!(css(r"#foo\:bar"), r#"//*[@id="foo:bar"]"#);
    assert_eq!(css(r"a\-b"), "//a-b");
}

#[test]
fn empty_input_fails_for_every_type() {
    let compiler = compiler();
    for expression_type in ExpressionType::ALL {
        for input in ["", "   "] {
            let err = compiler.compile(input, expression_type).unwrap_err();
            assert_eq!(error_kinds(&err), vec![DiagnosticKind::EmptySelector]);
        }
    }
}

#[test]
fn empty_input_message() {
    let err = compiler().compile("", ExpressionType::Css).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid selector ``: selector is empty");
}

#[test]
fn xpath_passthrough_on_both_routes() {
    let compiler = compiler();
    for xpath in ["//div[@id='x']", "/html/body/div[2]", "//a | //b"] {
        assert_eq!(compiler.compile(xpath, ExpressionType::Xpath).unwrap(), xpath);
        assert_eq!(compiler.compile(xpath, ExpressionType::Css).unwrap(), xpath);
    }
}

#[test]
fn unbalanced_xpath_is_invalid() {
    let err = compiler()
        .compile(r#"//div[@class="a""#, ExpressionType::Xpath)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidSelector { .. }));
    assert_eq!(error_kinds(&err), vec![DiagnosticKind::UnbalancedXPath]);
}

#[test]
fn regex_returned_unchanged() {
    let compiler = compiler();
    assert_eq!(
        compiler.compile(r"^item-\d+$", ExpressionType::Regex).unwrap(),
        r"^item-\d+$"
    );
    assert_eq!(
        compiler.compile(" /abc/i ", ExpressionType::Regex).unwrap(),
        "/abc/i"
    );
}

#[test]
fn invalid_regex() {
    let err = compiler().compile("(abc", ExpressionType::Regex).unwrap_err();
    assert_eq!(error_kinds(&err), vec![DiagnosticKind::InvalidRegex]);
}

#[test]
fn regex_and_xpath_are_not_cached() {
    let compiler = compiler();
    compiler.compile("//div", ExpressionType::Xpath).unwrap();
    compiler.compile("a+", ExpressionType::Regex).unwrap();
    assert!(compiler.cache_entries().is_empty());
}

#[test]
fn expression_type_by_name() {
    let compiler = compiler();
    assert_eq!(compiler.compile_as("div", "CSS").unwrap(), "//div");
    assert_eq!(compiler.compile_as("//div", "xpath").unwrap(), "//div");

    let err = compiler.compile_as("div", "json").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"unsupported expression type `json` (expected css, xpath or regex)"
    );
    assert!(err.diagnostics().is_none());
}

#[test]
fn syntax_error_is_invalid_selector() {
    let err = compiler().compile("div[", ExpressionType::Css).unwrap_err();
    let Error::InvalidSelector { selector, diagnostics } = &err else {
        panic!("expected InvalidSelector, got {err:?}");
    };
    assert_eq!(selector, "div[");
    assert!(diagnostics.kinds().contains(&DiagnosticKind::UnclosedBracket));
}

#[test]
fn cache_records_compiled_selector() {
    let compiler = compiler();
    let xpath = compiler.compile(" div > p ", ExpressionType::Css).unwrap();

    let entries = compiler.cache_entries();
    assert_eq!(entries.len(), 1);
    let (key, entry) = &entries[0];
    assert_eq!(*key, CacheKey::new("div > p", compiler.options()));
    assert_eq!(entry.selector, "div > p");
    assert_eq!(entry.xpath, xpath);

    assert_eq!(compiler.compile("div > p", ExpressionType::Css).unwrap(), xpath);
    assert_eq!(compiler.cache_entries().len(), 1);
}

#[test]
fn cache_hit_skips_compilation() {
    let compiler = compiler();
    let key = CacheKey::new("div", compiler.options());
    compiler.replace_cache(vec![(
        key,
        CacheEntry {
            selector: "div".to_string(),
            xpath: "//seeded".to_string(),
        },
    )]);

    assert_eq!(compiler.compile("div", ExpressionType::Css).unwrap(), "//seeded");
}

#[test]
fn colliding_key_is_a_miss() {
    let compiler = compiler();
    let key = CacheKey::new("div", compiler.options());
    compiler.replace_cache(vec![(
        key,
        CacheEntry {
            selector: "not div".to_string(),
            xpath: "//wrong".to_string(),
        },
    )]);

    assert_eq!(compiler.compile("div", ExpressionType::Css).unwrap(), "//div");
}

#[test]
fn clear_cache_forgets_everything() {
    let compiler = compiler();
    compiler.compile("p", ExpressionType::Css).unwrap();
    compiler.clear_cache();
    assert!(compiler.cache_entries().is_empty());
}

#[test]
fn options_do_not_share_cache_entries() {
    let cache: Arc<dyn SelectorCache> = Arc::new(MemoryCache::new());
    let first_only = Compiler::new().with_cache(cache.clone());
    let any = Compiler::new()
        .with_cache(cache.clone())
        .with_options(
            CompileOptions::default().with_general_sibling(super::GeneralSibling::AnyFollowing),
        );

    assert_eq!(
        first_only.compile("h1 ~ p", ExpressionType::Css).unwrap(),
        "//h1/following-sibling::p[1]"
    );
    assert_eq!(
        any.compile("h1 ~ p", ExpressionType::Css).unwrap(),
        "//h1/following-sibling::p"
    );
    assert_eq!(cache.len(), 2);
}

#[test]
fn unescaped_quote_in_output_is_rejected() {
    let source = r#"[title='a"b']"#;
    let err = compiler().compile(source, ExpressionType::Css).unwrap_err();
    assert_eq!(error_kinds(&err), vec![DiagnosticKind::UnterminatedOutput]);

    let escaped = compiler().with_options(
        CompileOptions::default().with_literal_quoting(LiteralQuoting::Escaped),
    );
    assert_eq!(
        escaped.compile(source, ExpressionType::Css).unwrap(),
        r#"//*[@title='a"b']"#
    );
}

#[test]
fn uncached_compilation_keeps_warnings() {
    let compilation = compiler()
        .compile_uncached("a:frobnicate > b", ExpressionType::Css)
        .unwrap();
    assert_eq!(compilation.xpath, "//a/b");
    assert_eq!(
        compilation.warnings.kinds(),
        vec![DiagnosticKind::UnknownPseudoClass]
    );
}

#[test]
fn segments_of_a_list() {
    let lists = compiler().segments("div > p, a").unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].len(), 2);

    let err = compiler().segments("  ").unwrap_err();
    assert_eq!(error_kinds(&err), vec![DiagnosticKind::EmptySelector]);
}

#[test]
fn compilation_is_deterministic_across_threads() {
    let compiler = compiler();
    let source = "table tr:nth-child(2n+1) > td.num";
    let expected = compiler.compile_uncached(source, ExpressionType::Css).unwrap().xpath;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| compiler.compile(source, ExpressionType::Css).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
    assert_eq!(compiler.cache_entries().len(), 1);
}

#[test]
fn global_entry_points() {
    let xpath = compile("section > h2.title", ExpressionType::Css).unwrap();
    assert!(xpath.starts_with("//section/h2["));
    assert!(
        cache_entries()
            .iter()
            .any(|(_, e)| e.selector == "section > h2.title" && e.xpath == xpath)
    );
}
