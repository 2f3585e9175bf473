//! Renders diagnostics against the selector text they point into.
//!
//! Selectors are usually a single line, so every report is one snippet with
//! the offending span underlined. The title already carries the message, so
//! the primary underline stays unlabeled; labels are reserved for related
//! spans such as the `[` or `(` an unclosed group was opened with.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

/// Builder for rendering a set of diagnostics.
///
/// Without a selector the diagnostics fall back to their one-line `Display` form.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    selector: Option<&'s str>,
    origin: Option<&'s str>,
    line: usize,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            selector: None,
            origin: None,
            line: 1,
            colored: false,
        }
    }

    /// The selector the diagnostic spans index into.
    pub fn source(mut self, selector: &'s str) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Where the selector came from, e.g. a selector file. Shown as `--> origin:line:col`.
    pub fn path(mut self, origin: &'s str) -> Self {
        self.origin = Some(origin);
        self
    }

    /// 1-based line of the selector within its origin.
    pub fn line(mut self, line: usize) -> Self {
        self.line = line.max(1);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(selector) = self.selector else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_str("\n\n")?;
            }
            let report = self.report(diag, selector);
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn report<'a>(&'a self, diag: &'a DiagnosticMessage, selector: &'a str) -> Vec<Group<'a>> {
        let range = underline(diag.range, selector.len());

        let mut snippet = Snippet::source(selector)
            .line_start(self.line)
            .annotation(AnnotationKind::Primary.span(range.clone()));
        if let Some(origin) = self.origin {
            snippet = snippet.path(origin);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(underline(related.range, selector.len()))
                    .label(&related.message),
            );
        }

        let mut title = level(diag.severity())
            .primary_title(&diag.message)
            .element(snippet);
        for hint in &diag.hints {
            title = title.element(Level::NOTE.with_name("hint").message(hint));
        }

        let mut report = vec![title];
        if let Some(fix) = &diag.fix {
            report.push(
                Level::HELP.secondary_title(&fix.description).element(
                    Snippet::source(selector)
                        .line_start(self.line)
                        .patch(Patch::new(range, &fix.replacement)),
                ),
            );
        }
        report
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

/// Byte range to underline, clamped to the selector.
///
/// Empty spans (a missing `]` at the end of input) get one column so the caret is visible.
fn underline(range: TextRange, len: usize) -> std::ops::Range<usize> {
    let start = usize::from(range.start()).min(len);
    let end = usize::from(range.end()).min(len);

    if start == end {
        return start..(start + 1).min(len);
    }
    start..end
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
