//! Segment compiler: assembled selectors to XPath location paths.
//!
//! [`Translator`] drives one compilation. It owns the warnings collected on the
//! way and the nesting depth of selector-valued pseudo-class arguments, which
//! the pseudo-class handlers re-enter through [`Translator::translate`].

pub mod attribute;
pub mod literal;

#[cfg(test)]
mod literal_tests;

pub use attribute::{attribute_condition, class_condition, compile_attribute, id_condition};
pub use literal::quote;

use csspath_core::{Combinator, Compound, Pseudo, Segment, is_xpath_literal};
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::dispatch::{CompileOptions, GeneralSibling, xpath};
use crate::pseudo::{PseudoContext, PseudoError, registry};
use crate::selector::{AssembledSelector, assemble, split_selector_list};

pub struct Translator<'o> {
    options: &'o CompileOptions,
    depth: usize,
    warnings: Diagnostics,
}

impl<'o> Translator<'o> {
    pub fn new(options: &'o CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            warnings: Diagnostics::new(),
        }
    }

    pub fn options(&self) -> &'o CompileOptions {
        self.options
    }

    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    pub fn into_warnings(self) -> Diagnostics {
        self.warnings
    }

    pub(crate) fn warn_all(&mut self, warnings: Diagnostics) {
        self.warnings.extend(warnings);
    }

    pub(crate) fn warn(&mut self, kind: DiagnosticKind, range: TextRange, detail: Option<&str>) {
        self.warnings.extend(Diagnostics::single(kind, range, detail));
    }

    /// Compiles an XPath literal, a selector list or a single selector found at
    /// `offset` in the top-level input.
    pub fn translate(&mut self, source: &str, offset: TextSize) -> Result<String, Diagnostics> {
        if is_xpath_literal(source) {
            xpath::check_balance(source).map_err(|d| d.shifted(offset))?;
            log::debug!("xpath passthrough: {source}");
            return Ok(source.to_string());
        }

        let fragments = split_selector_list(source);
        if fragments.is_empty() {
            return Err(Diagnostics::single(
                DiagnosticKind::EmptySelector,
                TextRange::at(offset, TextSize::of(source)),
                None,
            ));
        }

        let mut compiled = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            let assembled = assemble(fragment.text, offset + fragment.offset)?;
            compiled.push(self.compile_selector(&assembled)?);
        }
        Ok(compiled.join(" | "))
    }

    /// `//` followed by every segment's step, or the raw passthrough XPath.
    pub fn compile_selector(&mut self, assembled: &AssembledSelector) -> Result<String, Diagnostics> {
        self.warnings.extend(assembled.warnings().clone());

        let mut out = String::new();
        for (index, segment) in assembled.segments().iter().enumerate() {
            match segment {
                Segment::Xpath { xpath } => out.push_str(xpath),
                Segment::Compound(compound) => {
                    if index == 0 {
                        out.push_str("//");
                    }
                    let step = self.compile_segment(compound, index, assembled)?;
                    log::trace!("segment {index}: {step}");
                    out.push_str(&step);
                }
            }
        }
        Ok(out)
    }

    fn compile_segment(
        &mut self,
        compound: &Compound,
        index: usize,
        assembled: &AssembledSelector,
    ) -> Result<String, Diagnostics> {
        let quoting = self.options.literal_quoting;
        let mut out = String::new();

        match compound.combinator {
            Combinator::None => {}
            Combinator::Descendant if index == 0 => {}
            Combinator::Descendant => out.push_str("//"),
            Combinator::Child => out.push('/'),
            Combinator::AdjacentSibling | Combinator::GeneralSibling => {
                out.push_str("/following-sibling::")
            }
        }

        out.push_str(&compound.tag);

        let first_only = match compound.combinator {
            Combinator::AdjacentSibling => true,
            Combinator::GeneralSibling => self.options.general_sibling == GeneralSibling::FirstOnly,
            _ => false,
        };
        if first_only {
            out.push_str("[1]");
        }

        if let Some(id) = &compound.id {
            out.push_str(&format!("[{}]", id_condition(id, quoting)));
        }
        for class in &compound.classes {
            out.push_str(&format!("[{}]", class_condition(class, quoting)));
        }
        for attr in &compound.attributes {
            out.push_str(&compile_attribute(attr, quoting));
        }
        for (i, pseudo) in compound.pseudo_classes.iter().enumerate() {
            let span = assembled.pseudo_span(index, i);
            out.push_str(&self.compile_pseudo(pseudo, &compound.tag, span)?);
        }
        if let Some(element) = &compound.pseudo_element {
            log::trace!("pseudo-element ::{} left to the evaluator", element.name);
        }

        Ok(out)
    }

    /// Predicate for one pseudo-class, or `""` for a name nobody registered.
    pub fn compile_pseudo(
        &mut self,
        pseudo: &Pseudo,
        tag: &str,
        span: TextRange,
    ) -> Result<String, Diagnostics> {
        let Some(handler) = registry().get(&pseudo.name) else {
            log::warn!("unknown pseudo-class `:{}` compiles to no predicate", pseudo.name);
            self.warn(DiagnosticKind::UnknownPseudoClass, span, Some(&pseudo.name));
            return Ok(String::new());
        };

        let mut ctx = PseudoContext::new(self, &pseudo.name, pseudo.argument.as_deref(), span, tag);
        match handler(&mut ctx) {
            Ok(predicate) => Ok(predicate),
            Err(PseudoError::InvalidArgument(reason)) => {
                let mut diagnostics = Diagnostics::new();
                diagnostics
                    .report(DiagnosticKind::InvalidPseudoArgument, span)
                    .message(pseudo.name.as_str())
                    .hint(reason)
                    .emit();
                Err(diagnostics)
            }
            Err(PseudoError::Nested(diagnostics)) => Err(diagnostics),
        }
    }

    /// Runs `f` one nesting level deeper, failing once the limit is reached.
    pub(crate) fn nested<T>(
        &mut self,
        range: TextRange,
        f: impl FnOnce(&mut Self) -> Result<T, Diagnostics>,
    ) -> Result<T, Diagnostics> {
        if self.depth >= self.options.recursion_limit {
            let detail = format!("limit is {}", self.options.recursion_limit);
            return Err(Diagnostics::single(
                DiagnosticKind::NestingTooDeep,
                range,
                Some(&detail),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
