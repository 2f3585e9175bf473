//! Syntax check for regex expressions.
//!
//! Patterns are never executed here; `regex-syntax` only has to accept them.

use regex_syntax::{ParserBuilder, ast};
use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Characters that open a `/body/flags` style pattern.
const DELIMITERS: &[char] = &['/', '#', '~', '!', '@', '%', '|', ';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegexFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
    pub swap_greed: bool,
}

/// A pattern split into its body and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexPattern<'p> {
    pub body: &'p str,
    /// Where `body` starts in the original pattern.
    pub offset: usize,
    pub flags: RegexFlags,
}

/// Splits off delimiters and flags if the pattern opens with a delimiter.
pub fn split_delimited(pattern: &str) -> Result<RegexPattern<'_>, Diagnostics> {
    let Some(delimiter) = pattern.chars().next().filter(|c| DELIMITERS.contains(c)) else {
        return Ok(RegexPattern {
            body: pattern,
            offset: 0,
            flags: RegexFlags::default(),
        });
    };

    let start = delimiter.len_utf8();
    let Some(end) = pattern[start..].rfind(delimiter).map(|i| i + start) else {
        return Err(Diagnostics::single(
            DiagnosticKind::InvalidRegex,
            TextRange::up_to(TextSize::of(pattern)),
            Some(&format!("missing closing delimiter `{delimiter}`")),
        ));
    };

    let mut flags = RegexFlags::default();
    let flags_start = end + delimiter.len_utf8();
    for (i, flag) in pattern[flags_start..].char_indices() {
        match flag {
            'i' => flags.case_insensitive = true,
            'm' => flags.multi_line = true,
            's' => flags.dot_matches_new_line = true,
            'x' => flags.ignore_whitespace = true,
            'U' => flags.swap_greed = true,
            // Unicode is always on.
            'u' => {}
            other => {
                let at = TextSize::from((flags_start + i) as u32);
                return Err(Diagnostics::single(
                    DiagnosticKind::InvalidRegex,
                    TextRange::at(at, TextSize::of(other)),
                    Some(&format!("unknown flag `{other}`")),
                ));
            }
        }
    }

    Ok(RegexPattern {
        body: &pattern[start..end],
        offset: start,
        flags,
    })
}

/// Accepts the pattern if `regex-syntax` can parse it.
///
/// Backreferences and look-around are valid in the engines downstream
/// evaluators use, so they are not counted as syntax errors.
pub fn validate(pattern: &str) -> Result<(), Diagnostics> {
    let parsed = split_delimited(pattern)?;
    let flags = parsed.flags;

    let result = ParserBuilder::new()
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .ignore_whitespace(flags.ignore_whitespace)
        .swap_greed(flags.swap_greed)
        .octal(false)
        .build()
        .parse(parsed.body);

    let (message, span) = match result {
        Ok(_) => return Ok(()),
        Err(regex_syntax::Error::Parse(e)) => {
            if matches!(
                e.kind(),
                ast::ErrorKind::UnsupportedBackreference | ast::ErrorKind::UnsupportedLookAround
            ) {
                log::debug!("regex accepted with unsupported construct: {}", e.kind());
                return Ok(());
            }
            (e.kind().to_string(), *e.span())
        }
        Err(regex_syntax::Error::Translate(e)) => (e.kind().to_string(), *e.span()),
        Err(other) => (other.to_string(), ast::Span::splat(ast::Position::new(0, 1, 1))),
    };

    let start = parsed.offset + span.start.offset;
    let end = parsed.offset + span.end.offset;
    let range = TextRange::new(
        TextSize::from(start as u32),
        TextSize::from(end.max(start) as u32),
    );
    Err(Diagnostics::single(
        DiagnosticKind::InvalidRegex,
        range,
        Some(&message),
    ))
}
