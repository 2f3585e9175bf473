use rowan::{TextRange, TextSize};

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedClassName, range(0, 1))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.message(), "expected class name after `.`");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownPseudoClass, range(3, 10))
        .message("hovered")
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    insta::assert_snapshot!(diagnostics.to_string(), @"warning at 3..10: unknown pseudo-class `:hovered`");
}

#[test]
fn single_builds_one_diagnostic() {
    let diagnostics = Diagnostics::single(
        DiagnosticKind::InvalidRegex,
        range(0, 4),
        Some("missing closing delimiter"),
    );

    assert_eq!(diagnostics.kinds(), vec![DiagnosticKind::InvalidRegex]);
    assert_eq!(
        diagnostics.summary(),
        "invalid regular expression: missing closing delimiter"
    );
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBracket, range(0, 5))
        .message("primary")
        .related_to("related info", range(6, 10))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    let result = diagnostics.render("hello world!");
    insta::assert_snapshot!(result, @r"
    error: missing closing `]`: primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn builder_with_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 5))
        .message("fixable")
        .fix("apply this fix", "fixed")
        .emit();

    let result = diagnostics.render("hello world");
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`: fixable
      |
    1 | hello world
      | ^^^^^
      |
    help: apply this fix
      |
    1 - hello world
    1 + fixed world
      |
    ");
}

#[test]
fn hints_follow_the_snippet() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DanglingCombinator, range(4, 5))
        .emit();

    let result = diagnostics.render("div >");
    insta::assert_snapshot!(result, @r"
    warning: dangling combinator
      |
    1 | div >
      |     ^
      |
      = hint: the combinator has no compound on one side and is ignored
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::EmptySelector, range(0, 5))
        .message("test")
        .emit();

    let result = diagnostics.render_colored("hello", true);
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    let result = diagnostics.render("source");
    assert!(result.is_empty());
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedIdName, range(0, 1))
        .emit();

    let result = diagnostics.printer().source("#").path("query.css").render();
    insta::assert_snapshot!(result, @r"
    error: expected id after `#`
     --> query.css:1:1
      |
    1 | #
      | ^
    ");
}

#[test]
fn printer_with_selector_file_line() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedClassName, range(4, 5))
        .emit();

    let result = diagnostics
        .printer()
        .source("div .")
        .path("selectors.txt")
        .line(3)
        .render();
    insta::assert_snapshot!(result, @r"
    error: expected class name after `.`
     --> selectors.txt:3:5
      |
    3 | div .
      |     ^
    ");
}

#[test]
fn printer_clamps_spans_past_the_end() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSelector, range(3, 9))
        .emit();

    let result = diagnostics.render("a >");
    assert!(result.starts_with("error: expected a selector"));
    assert!(result.contains("1 | a >"));
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedSelector, TextRange::empty(0.into()))
        .message("zero width error")
        .emit();

    let result = diagnostics.render("hello");
    insta::assert_snapshot!(result, @r"
    error: expected a selector: zero width error
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_multiple_diagnostics() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(0, 5))
        .message("first error")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(6, 10))
        .message("`orld`")
        .emit();

    let result = diagnostics.render("hello world!");
    insta::assert_snapshot!(result, @r"
    error: missing closing `)`: first error
      |
    1 | hello world!
      | ^^^^^

    error: unexpected `orld`
      |
    1 | hello world!
      |       ^^^^
    ");
}

#[test]
fn plain_format_without_source() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBracket, range(0, 4))
        .related_to("`[` opened here", range(0, 1))
        .fix("insert `]`", "]")
        .emit();

    insta::assert_snapshot!(
        diagnostics.printer().render(),
        @"error at 0..4: missing closing `]` (fix: insert `]`) (related: `[` opened here at 0..1)"
    );
}

#[test]
fn diagnostics_collection_methods() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBracket, TextRange::empty(0.into()))
        .emit();
    diagnostics
        .report(DiagnosticKind::RepeatedCombinator, TextRange::empty(1.into()))
        .emit();

    assert!(!diagnostics.is_empty());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.warnings().count(), 1);
}

#[test]
fn diagnostic_kind_default_severity() {
    assert_eq!(
        DiagnosticKind::UnclosedBracket.default_severity(),
        Severity::Error
    );
    assert_eq!(
        DiagnosticKind::UnterminatedOutput.default_severity(),
        Severity::Error
    );
    assert_eq!(
        DiagnosticKind::UnsupportedNegation.default_severity(),
        Severity::Warning
    );
}

#[test]
fn diagnostic_kind_suppression_order() {
    // Earlier in the enum suppresses later
    assert!(DiagnosticKind::UnclosedBracket.suppresses(&DiagnosticKind::ExpectedAttributeValue));
    assert!(DiagnosticKind::UnterminatedString.suppresses(&DiagnosticKind::UnexpectedToken));

    assert!(!DiagnosticKind::UnclosedParen.suppresses(&DiagnosticKind::UnclosedParen));
    assert!(!DiagnosticKind::UnexpectedToken.suppresses(&DiagnosticKind::UnclosedBracket));
}

#[test]
fn diagnostic_kind_message_rendering() {
    assert_eq!(
        DiagnosticKind::UnclosedParen.message(None),
        "missing closing `)`"
    );
    assert_eq!(
        DiagnosticKind::InvalidPseudoArgument.message(Some("nth-child")),
        "invalid argument for `:nth-child`"
    );
    assert_eq!(
        DiagnosticKind::NestingTooDeep.message(Some("limit is 32")),
        "selector nested too deeply: limit is 32"
    );
}

#[test]
fn filtered_keeps_disjoint_spans() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedBracket, range(0, 5))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(10, 15))
        .emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn filtered_suppresses_same_start() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedAttributeValue, range(5, 6))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnterminatedString, range(5, 9))
        .emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.kinds(), vec![DiagnosticKind::UnterminatedString]);
}

#[test]
fn summary_counts_remaining_errors() {
    let mut diagnostics = Diagnostics::new();
    assert_eq!(diagnostics.summary(), "no errors");

    diagnostics
        .report(DiagnosticKind::ExpectedIdName, range(0, 1))
        .emit();
    diagnostics
        .report(DiagnosticKind::UnknownPseudoClass, range(2, 4))
        .message("x")
        .emit();
    diagnostics
        .report(DiagnosticKind::ExpectedClassName, range(5, 6))
        .emit();

    assert_eq!(
        diagnostics.summary(),
        "expected id after `#` (and 1 more errors)"
    );
}

#[test]
fn shifted_moves_primary_and_related_spans() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedParen, range(1, 3))
        .related_to("`(` opened here", range(1, 2))
        .emit();

    let shifted = diagnostics.shifted(TextSize::from(10));
    insta::assert_snapshot!(
        shifted.to_string(),
        @"error at 11..13: missing closing `)` (related: `(` opened here at 11..12)"
    );
}

#[test]
fn extend_appends_in_order() {
    let mut first = Diagnostics::single(DiagnosticKind::EmptySelector, range(0, 0), None);
    let second = Diagnostics::single(DiagnosticKind::InvalidRegex, range(0, 1), None);
    first.extend(second);

    assert_eq!(
        first.kinds(),
        vec![DiagnosticKind::EmptySelector, DiagnosticKind::InvalidRegex]
    );
}
