//! Balance check for XPath text.

use rowan::{TextRange, TextSize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Checks that `(`/`)` and `[`/`]` pair up, ignoring string literals.
///
/// Reports the first closer without an opener, or else the innermost opener
/// still open at the end. An unterminated string literal is reported at its quote.
pub fn check_balance(xpath: &str) -> Result<(), Diagnostics> {
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<(char, usize)> = None;

    for (i, c) in xpath.char_indices() {
        if let Some((q, _)) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some((c, i)),
            '(' | '[' => open.push((c, i)),
            ')' | ']' => {
                let expected = if c == ')' { '(' } else { '[' };
                match open.pop() {
                    Some((opener, _)) if opener == expected => {}
                    Some((opener, at)) => {
                        let detail = format!("`{c}` closes `{opener}` opened at {at}");
                        return Err(at_char(i, c, &detail));
                    }
                    None => {
                        let detail = format!("`{c}` has no matching opener");
                        return Err(at_char(i, c, &detail));
                    }
                }
            }
            _ => {}
        }
    }

    if let Some((q, at)) = quote {
        let detail = "string literal is never closed";
        return Err(at_char(at, q, detail));
    }
    if let Some((opener, at)) = open.pop() {
        let detail = format!("`{opener}` is never closed");
        return Err(at_char(at, opener, &detail));
    }
    Ok(())
}

fn at_char(offset: usize, c: char, detail: &str) -> Diagnostics {
    let range = TextRange::at(TextSize::from(offset as u32), TextSize::of(c));
    Diagnostics::single(DiagnosticKind::UnbalancedXPath, range, Some(detail))
}
