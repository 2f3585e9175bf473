//! `an+b` formulas.

use super::PseudoError;

/// A parsed `an+b` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    Even,
    Odd,
    /// `a` is 0 for a bare integer.
    Linear { a: i64, b: i64 },
}

/// Parses `even`, `odd`, `5`, `n`, `-n+3`, `2n + 1`, ... (case-insensitive).
pub fn parse_formula(input: &str) -> Option<Formula> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    match compact.as_str() {
        "" => return None,
        "even" => return Some(Formula::Even),
        "odd" => return Some(Formula::Odd),
        _ => {}
    }

    let Some((coefficient, offset)) = compact.split_once('n') else {
        return parse_signed(&compact).map(|b| Formula::Linear { a: 0, b });
    };

    let a = match coefficient {
        "" | "+" => 1,
        "-" => -1,
        digits => parse_signed(digits)?,
    };
    let b = match offset {
        "" => 0,
        // The sign is mandatory between the two terms.
        signed if signed.starts_with(['+', '-']) => parse_signed(signed)?,
        _ => return None,
    };
    Some(Formula::Linear { a, b })
}

fn parse_signed(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Condition selecting the positions `formula` describes, `position` being
/// the XPath expression for the 1-based index being tested.
pub fn formula_condition(formula: Formula, position: &str) -> String {
    match formula {
        Formula::Even => format!("{position} mod 2 = 0"),
        Formula::Odd => format!("{position} mod 2 = 1"),
        Formula::Linear { a: 0, b } => format!("{position} = {b}"),
        // Only positions <= 0 would match, and there are none.
        Formula::Linear { a, b } if a < 0 && b <= 0 => "false()".to_string(),
        Formula::Linear { a, b: 0 } => format!("{position} mod {} = 0", a.unsigned_abs()),
        Formula::Linear { a, b } => {
            let step = a.unsigned_abs();
            let residue = i128::from(b).rem_euclid(i128::from(step));
            let cmp = if a > 0 { ">=" } else { "<=" };
            format!("{position} {cmp} {b} and {position} mod {step} = {residue}")
        }
    }
}

/// Which index an `nth-*` pseudo-class counts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counting {
    Child,
    LastChild,
    OfType,
    LastOfType,
}

impl Counting {
    pub fn position(self, tag: &str) -> String {
        match self {
            Self::Child => "position()".to_string(),
            Self::LastChild => "(last() - position() + 1)".to_string(),
            Self::OfType => format!("(count(preceding-sibling::{tag}) + 1)"),
            Self::LastOfType => format!("(count(following-sibling::{tag}) + 1)"),
        }
    }
}

pub fn nth_predicate(argument: &str, counting: Counting, tag: &str) -> Result<String, PseudoError> {
    if argument.is_empty() {
        return Err(PseudoError::invalid("expected an `an+b` formula"));
    }
    let formula = parse_formula(argument)
        .ok_or_else(|| PseudoError::invalid(format!("`{argument}` is not an `an+b` formula")))?;
    Ok(format!(
        "[{}]",
        formula_condition(formula, &counting.position(tag))
    ))
}
