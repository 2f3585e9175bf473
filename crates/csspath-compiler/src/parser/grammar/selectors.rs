use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{COMBINATORS, COMPOUND_FIRST, SELECTOR_FIRST, TYPE_FIRST};

impl Parser<'_> {
    /// `selector (',' selector)*`
    pub fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Root);

        if self.at_end() {
            self.error(DiagnosticKind::EmptySelector);
        }

        while !self.at_end() {
            if self.currently_is_one_of(SELECTOR_FIRST) {
                self.parse_selector();
            } else if self.currently_is(SyntaxKind::Comma) {
                self.error_msg(DiagnosticKind::ExpectedSelector, "before `,`");
            } else {
                self.error_unexpected();
                continue;
            }

            if self.currently_is(SyntaxKind::Comma) {
                self.bump();
                if self.at_end() {
                    self.error_msg(DiagnosticKind::ExpectedSelector, "after `,`");
                }
            } else if !self.at_end() {
                self.error_unexpected();
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// `combinator? compound (combinator? compound)* combinator?`
    ///
    /// Leading and trailing combinators are kept in the tree but only warned
    /// about; the assembler ignores combinators with nothing on one side.
    fn parse_selector(&mut self) {
        self.start_node(SyntaxKind::Selector);

        while self.currently_is_one_of(COMBINATORS) {
            let range = self.current_span();
            self.report_at(DiagnosticKind::DanglingCombinator, range);
            self.bump_as_error();
        }

        if self.currently_is_one_of(COMPOUND_FIRST) {
            loop {
                self.parse_compound();
                if !self.parse_combinator() {
                    break;
                }
            }
        } else {
            self.error(DiagnosticKind::ExpectedSelector);
        }

        self.finish_node();
    }

    /// Returns whether another compound follows.
    fn parse_combinator(&mut self) -> bool {
        let descendant = self.has_trivia_before();
        let kind = self.current();

        if COMBINATORS.contains(kind) {
            let range = self.current_span();
            self.start_node(SyntaxKind::Combinator);
            self.bump();
            self.finish_node();

            while self.currently_is_one_of(COMBINATORS) {
                let extra = self.current_span();
                self.report_at(DiagnosticKind::RepeatedCombinator, extra);
                self.bump_as_error();
            }

            if self.currently_is_one_of(COMPOUND_FIRST) {
                return true;
            }
            self.report_at(DiagnosticKind::DanglingCombinator, range);
            return false;
        }

        if descendant && COMPOUND_FIRST.contains(kind) {
            self.wrap_trivia(SyntaxKind::Combinator);
            return true;
        }

        false
    }

    /// `type? (id | class | attribute | pseudo)*`, all parts adjacent.
    fn parse_compound(&mut self) {
        self.start_node(SyntaxKind::Compound);

        if self.currently_is_one_of(TYPE_FIRST) {
            self.start_node(SyntaxKind::TypeSelector);
            self.bump();
            self.finish_node();
        }

        while !self.has_trivia_before() {
            match self.current() {
                SyntaxKind::Hash => self.parse_named(SyntaxKind::IdSelector),
                SyntaxKind::Dot => self.parse_named(SyntaxKind::ClassSelector),
                SyntaxKind::BracketOpen => self.parse_attribute(),
                SyntaxKind::Colon | SyntaxKind::DoubleColon => self.parse_pseudo(),
                kind if TYPE_FIRST.contains(kind) && !self.eof() => {
                    let text = self.current_text();
                    self.error_and_bump_msg(
                        DiagnosticKind::UnexpectedToken,
                        format!("`{}`, the type selector must start the compound", text),
                    );
                }
                _ => break,
            }
        }

        self.finish_node();
    }

    /// `#name` | `.name`
    ///
    /// Names may be split across tokens (`.2col` lexes as a number and an
    /// identifier), so every adjacent name-like token is taken.
    fn parse_named(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump(); // '#' or '.'

        let mut has_name = false;
        while !self.has_trivia_before()
            && matches!(
                self.current(),
                SyntaxKind::Ident | SyntaxKind::Number | SyntaxKind::Minus
            )
        {
            self.bump();
            has_name = true;
        }

        if !has_name {
            let diagnostic = if kind == SyntaxKind::IdSelector {
                DiagnosticKind::ExpectedIdName
            } else {
                DiagnosticKind::ExpectedClassName
            };
            self.error(diagnostic);
        }

        self.finish_node();
    }

    pub(super) fn error_unexpected(&mut self) {
        if self.currently_is(SyntaxKind::UnclosedString) {
            self.error_and_bump(DiagnosticKind::UnterminatedString);
            return;
        }
        let text = self.current_text();
        self.error_and_bump_msg(DiagnosticKind::UnexpectedToken, format!("`{}`", text));
    }
}
