use csspath_core::{Compound, Pseudo, Segment};
use rowan::{TextRange, TextSize};

use crate::compile::{Translator, quote};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::dispatch::CompileOptions;
use crate::parser::ast::unescape;
use crate::selector::{assemble, split_selector_list};

#[derive(Debug, Clone, thiserror::Error)]
pub enum PseudoError {
    /// Reported as an invalid-argument error on the pseudo-class.
    #[error("{0}")]
    InvalidArgument(String),

    /// A selector-valued argument failed to compile; already located.
    #[error("invalid selector argument")]
    Nested(Diagnostics),
}

impl PseudoError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}

/// What a handler sees of the pseudo-class it compiles.
pub struct PseudoContext<'a, 'o> {
    translator: &'a mut Translator<'o>,
    name: &'a str,
    argument: Option<&'a str>,
    /// Argument text, or the pseudo-class itself when it has none.
    span: TextRange,
    tag: &'a str,
}

impl<'a, 'o> PseudoContext<'a, 'o> {
    pub(crate) fn new(
        translator: &'a mut Translator<'o>,
        name: &'a str,
        argument: Option<&'a str>,
        span: TextRange,
        tag: &'a str,
    ) -> Self {
        Self {
            translator,
            name,
            argument,
            span,
            tag,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Tag of the enclosing compound, `*` when it has none.
    pub fn tag(&self) -> &'a str {
        self.tag
    }

    pub fn span(&self) -> TextRange {
        self.span
    }

    pub fn options(&self) -> &'o CompileOptions {
        self.translator.options()
    }

    /// Trimmed argument, `""` without parentheses.
    pub fn argument(&self) -> &'a str {
        self.argument.map(str::trim).unwrap_or_default()
    }

    /// Where the trimmed argument starts, relative to [`span`](Self::span).
    pub fn argument_offset(&self) -> TextSize {
        let raw = self.argument.unwrap_or_default();
        TextSize::of(&raw[..raw.len() - raw.trim_start().len()])
    }

    pub fn require_argument(&self, expected: &str) -> Result<&'a str, PseudoError> {
        match self.argument() {
            "" => Err(PseudoError::invalid(format!("expected {expected}"))),
            arg => Ok(arg),
        }
    }

    /// Argument as text: surrounding quotes removed and escapes resolved.
    pub fn text_argument(&self) -> Result<String, PseudoError> {
        let arg = self.require_argument("text")?;
        Ok(unquote(arg))
    }

    /// XPath literal for `value` under the configured quoting.
    pub fn quote(&self, value: &str) -> String {
        quote(value, self.options().literal_quoting)
    }

    pub fn warn(&mut self, kind: DiagnosticKind, detail: Option<&str>) {
        let span = self.span;
        self.translator.warn(kind, span, detail);
    }

    /// Compiles `source`, a piece of the argument starting `offset` bytes into it,
    /// as a full selector one nesting level deeper.
    pub fn compile_selector(&mut self, source: &str, offset: TextSize) -> Result<String, PseudoError> {
        let start = self.span.start() + offset;
        let range = TextRange::at(start, TextSize::of(source));
        self.translator
            .nested(range, |t| t.translate(source, start))
            .map_err(PseudoError::Nested)
    }

    /// The argument as a comma list of compound selectors, each with its offset.
    pub fn compound_list(&mut self) -> Result<Vec<(Compound, TextRange)>, PseudoError> {
        let raw = self.argument.unwrap_or_default();
        let base = self.span.start();
        let fragments = split_selector_list(raw);
        if fragments.is_empty() {
            return Err(PseudoError::invalid("expected a selector list"));
        }

        let mut compounds = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let start = base + fragment.offset;
            let range = TextRange::at(start, TextSize::of(fragment.text));
            let assembled = self
                .translator
                .nested(range, |_| assemble(fragment.text, start))
                .map_err(PseudoError::Nested)?;
            self.translator.warn_all(assembled.warnings().clone());

            match assembled.into_segments().as_slice() {
                [Segment::Compound(compound)] => compounds.push((compound.clone(), range)),
                _ => {
                    return Err(PseudoError::invalid(format!(
                        "`{}` is not a compound selector",
                        fragment.text
                    )));
                }
            }
        }
        Ok(compounds)
    }

    /// Predicate of a pseudo-class nested in this one's argument.
    pub fn compile_inner_pseudo(
        &mut self,
        pseudo: &Pseudo,
        tag: &str,
        range: TextRange,
    ) -> Result<String, PseudoError> {
        self.translator
            .nested(range, |t| t.compile_pseudo(pseudo, tag, range))
            .map_err(PseudoError::Nested)
    }
}

/// Strips one pair of matching quotes, then resolves CSS escapes.
pub(crate) fn unquote(text: &str) -> String {
    let inner = ['"', '\'']
        .iter()
        .find_map(|&q| {
            text.strip_prefix(q)
                .and_then(|rest| rest.strip_suffix(q))
        })
        .unwrap_or(text);
    unescape(inner)
}
