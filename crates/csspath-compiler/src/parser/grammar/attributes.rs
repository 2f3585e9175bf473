use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::{
    ATTR_MATCHERS, ATTR_NAME_RECOVERY, ATTR_RECOVERY, ATTR_VALUE_STOP,
};

impl Parser<'_> {
    /// `[name]` | `[name op value modifier?]`
    pub(super) fn parse_attribute(&mut self) {
        let open = self.current_span();
        self.start_node(SyntaxKind::AttributeSelector);
        self.bump(); // '['

        if self.currently_is(SyntaxKind::Ident) {
            self.start_node(SyntaxKind::AttrName);
            self.bump();
            self.finish_node();
        } else {
            self.error_recover(
                DiagnosticKind::ExpectedAttributeName,
                "after `[`",
                ATTR_NAME_RECOVERY,
            );
        }

        if self.currently_is_one_of(ATTR_MATCHERS) {
            self.start_node(SyntaxKind::AttrMatcher);
            self.bump();
            self.finish_node();
            self.parse_attr_value();
        }

        if self.currently_is(SyntaxKind::Ident) && is_case_modifier(self.current_text()) {
            self.start_node(SyntaxKind::AttrModifier);
            self.bump();
            self.finish_node();
        }

        if !self.at_end() && !self.currently_is(SyntaxKind::BracketClose) {
            if self.currently_is(SyntaxKind::UnclosedString) {
                self.error_and_bump(DiagnosticKind::UnterminatedString);
            } else {
                let text = self.current_text();
                self.error_recover(
                    DiagnosticKind::UnexpectedToken,
                    format!("`{}` in attribute selector", text),
                    ATTR_RECOVERY,
                );
            }
        }

        if !self.eat_token(SyntaxKind::BracketClose) {
            self.error_unclosed_delimiter(
                DiagnosticKind::UnclosedBracket,
                "`[` opened here",
                open,
                "]",
            );
        }

        self.finish_node();
    }

    /// Quoted string, or a run of adjacent tokens up to whitespace or `]`.
    fn parse_attr_value(&mut self) {
        match self.current() {
            SyntaxKind::DoubleQuote | SyntaxKind::SingleQuote => {
                self.start_node(SyntaxKind::AttrValue);
                self.parse_str();
                self.finish_node();
            }
            _ if self.currently_is(SyntaxKind::UnclosedString) => {
                self.error_and_bump(DiagnosticKind::UnterminatedString);
            }
            kind if self.at_end() || ATTR_VALUE_STOP.contains(kind) => {
                self.error(DiagnosticKind::ExpectedAttributeValue);
            }
            _ => {
                self.start_node(SyntaxKind::AttrValue);
                self.bump();
                while !self.has_trivia_before()
                    && !self.eof()
                    && !self.currently_is_one_of(ATTR_VALUE_STOP)
                    && !self.currently_is(SyntaxKind::UnclosedString)
                {
                    self.bump();
                }
                self.finish_node();
            }
        }
    }

    /// `"text"` | `'text'`
    pub(super) fn parse_str(&mut self) {
        self.start_node(SyntaxKind::Str);
        let open_quote = self.current();
        self.bump(); // opening quote

        if self.current() == SyntaxKind::StrVal {
            self.bump();
        }

        let closing = self.current();
        assert_eq!(
            closing, open_quote,
            "parse_str: expected closing {:?} but found {:?} \
             (lexer should only produce quote tokens from complete strings)",
            open_quote, closing
        );
        self.bump();
        self.finish_node();
    }
}

fn is_case_modifier(text: &str) -> bool {
    matches!(text, "i" | "I" | "s" | "S")
}
