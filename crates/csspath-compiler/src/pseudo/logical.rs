//! Pseudo-classes taking selectors: `:not`, `:has`, `:is` and its aliases.

use csspath_core::{ANY_TAG, Combinator, Compound};
use rowan::TextSize;

use super::{PseudoContext, PseudoError, PseudoRegistry};
use crate::compile::{attribute_condition, class_condition, id_condition};
use crate::diagnostics::DiagnosticKind;
use crate::dispatch::LiteralQuoting;
use crate::selector::split_selector_list;

pub(super) fn register(registry: &mut PseudoRegistry) {
    registry.register("not", negation);
    registry.register("has", containment);
    registry.register("is", any_of);
    registry.register("where", any_of);
    registry.register("matches", any_of);
    registry.register("any", any_of);
}

/// AND of the negated id, class and attribute conditions of every list item.
///
/// Tags and pseudo-classes inside the argument are not negated; they are
/// reported as warnings and left out.
fn negation(ctx: &mut PseudoContext<'_, '_>) -> Result<String, PseudoError> {
    let quoting = ctx.options().literal_quoting;
    let mut negated = Vec::new();

    for (compound, _) in ctx.compound_list()? {
        if compound.tag != ANY_TAG {
            let detail = format!("type selector `{}` inside `:not()`", compound.tag);
            ctx.warn(DiagnosticKind::UnsupportedNegation, Some(&detail));
        }
        for pseudo in &compound.pseudo_classes {
            let detail = format!("pseudo-class `:{}` inside `:not()`", pseudo.name);
            ctx.warn(DiagnosticKind::UnsupportedNegation, Some(&detail));
        }
        negated.extend(
            simple_conditions(&compound, quoting)
                .into_iter()
                .map(|c| format!("not({c})")),
        );
    }

    if negated.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("[{}]", negated.join(" and ")))
}

/// Conditions of the id, the classes and the attributes, in that order.
fn simple_conditions(compound: &Compound, quoting: LiteralQuoting) -> Vec<String> {
    let mut conditions = Vec::new();
    if let Some(id) = &compound.id {
        conditions.push(id_condition(id, quoting));
    }
    for class in &compound.classes {
        conditions.push(class_condition(class, quoting));
    }
    for attr in &compound.attributes {
        conditions.push(attribute_condition(attr, quoting));
    }
    conditions
}

/// Existence of a relative match.
///
/// Each list item may open with a combinator: `>` looks at children, `+` at
/// the next sibling, `~` at any later sibling, none at descendants.
fn containment(ctx: &mut PseudoContext<'_, '_>) -> Result<String, PseudoError> {
    let raw = ctx.require_argument("a relative selector")?;
    let raw_start = ctx.argument_offset();
    let mut paths = Vec::new();

    for fragment in split_selector_list(raw) {
        let (combinator, rest) = leading_combinator(fragment.text);
        let skipped = fragment.text.len() - rest.len();
        let offset = raw_start + fragment.offset + TextSize::from(skipped as u32);

        // A single selector per fragment, so no top-level `|` to split on.
        let compiled = ctx.compile_selector(rest, offset)?;
        let Some(relative) = compiled.strip_prefix("//") else {
            paths.push(compiled);
            continue;
        };
        paths.push(match combinator {
            Combinator::Child => format!("./{relative}"),
            Combinator::AdjacentSibling => {
                format!("following-sibling::{}", first_step_limited(relative))
            }
            Combinator::GeneralSibling => format!("following-sibling::{relative}"),
            _ => format!(".//{relative}"),
        });
    }

    if paths.is_empty() {
        return Err(PseudoError::invalid("expected a relative selector"));
    }
    Ok(format!("[{}]", paths.join(" | ")))
}

fn leading_combinator(text: &str) -> (Combinator, &str) {
    let mut chars = text.chars();
    match chars.next().and_then(Combinator::from_char) {
        Some(combinator) => (combinator, chars.as_str().trim_start()),
        None => (Combinator::Descendant, text),
    }
}

/// `p/x` becomes `p[1]/x`: only the very next sibling may match.
fn first_step_limited(path: &str) -> String {
    let end = first_step_end(path);
    format!("{}[1]{}", &path[..end], &path[end..])
}

/// End of the name test of the first location step.
fn first_step_end(path: &str) -> usize {
    path.find(['[', '/']).unwrap_or(path.len())
}

/// OR of the item conditions; a tag contributes `self::tag`.
fn any_of(ctx: &mut PseudoContext<'_, '_>) -> Result<String, PseudoError> {
    let quoting = ctx.options().literal_quoting;
    let mut alternatives = Vec::new();

    for (compound, range) in ctx.compound_list()? {
        let mut conditions = Vec::new();
        if compound.tag != ANY_TAG {
            conditions.push(format!("self::{}", compound.tag));
        }
        conditions.extend(
            simple_conditions(&compound, quoting)
                .into_iter()
                .map(|c| if c.contains(" or ") { format!("({c})") } else { c }),
        );
        for pseudo in &compound.pseudo_classes {
            let predicate = ctx.compile_inner_pseudo(pseudo, &compound.tag, range)?;
            if let Some(inner) = predicate.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
                conditions.push(format!("({inner})"));
            }
        }

        alternatives.push(if conditions.is_empty() {
            "true()".to_string()
        } else {
            conditions.join(" and ")
        });
    }

    match alternatives.as_slice() {
        [single] => Ok(format!("[{single}]")),
        _ => {
            let parts: Vec<String> = alternatives.iter().map(|a| format!("({a})")).collect();
            Ok(format!("[{}]", parts.join(" or ")))
        }
    }
}
