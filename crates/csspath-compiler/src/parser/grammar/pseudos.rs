use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;

/// Pseudo-elements that CSS 2 spelled with a single colon.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

impl Parser<'_> {
    /// `:name` | `::name` | either followed by `(args)`
    pub(super) fn parse_pseudo(&mut self) {
        let checkpoint = self.checkpoint();
        let double = self.currently_is(SyntaxKind::DoubleColon);
        self.bump(); // ':' or '::'

        let mut name = None;
        if !self.has_trivia_before() && self.currently_is(SyntaxKind::Ident) {
            name = Some(self.current_text().to_ascii_lowercase());
            self.bump();
        }

        let legacy = name
            .as_deref()
            .is_some_and(|n| LEGACY_PSEUDO_ELEMENTS.contains(&n));
        let kind = if double || legacy {
            SyntaxKind::PseudoElement
        } else {
            SyntaxKind::PseudoClass
        };
        self.start_node_at(checkpoint, kind);

        if name.is_none() {
            self.error(DiagnosticKind::ExpectedPseudoName);
        }

        if !self.has_trivia_before() && self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_pseudo_args();
        }

        self.finish_node();
    }

    /// `( ... )` kept verbatim, trivia included; only parens are balanced.
    ///
    /// Arguments are selectors for some pseudo-classes and formulas or text for
    /// others, so interpreting them is left to the pseudo-class compiler.
    fn parse_pseudo_args(&mut self) {
        let open = self.current_span();
        self.start_node(SyntaxKind::PseudoArgs);
        self.bump(); // '('

        let mut depth = 1usize;
        loop {
            if self.at_end() {
                self.error_unclosed_delimiter(
                    DiagnosticKind::UnclosedParen,
                    "`(` opened here",
                    open,
                    ")",
                );
                break;
            }

            match self.current() {
                SyntaxKind::ParenOpen => depth += 1,
                SyntaxKind::ParenClose => depth -= 1,
                _ if self.currently_is(SyntaxKind::UnclosedString) => {
                    self.error(DiagnosticKind::UnterminatedString);
                }
                _ => {}
            }

            self.bump();
            if depth == 0 {
                break;
            }
        }

        self.finish_node();
    }
}
