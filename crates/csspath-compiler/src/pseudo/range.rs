//! Numeric range filters.
//!
//! Arguments are parsed leniently: anything malformed compiles to `[true()]`,
//! so a bad range filters nothing out instead of failing the selector.

use super::{PseudoContext, PseudoError, PseudoRegistry};

const MATCH_ALL: &str = "[true()]";

const TEXT_LENGTH: &str = "string-length(normalize-space(.))";
const DEPTH: &str = "count(ancestor::*)";
const CHILDREN: &str = "count(*)";

pub(super) fn register(registry: &mut PseudoRegistry) {
    registry.register("slice", |ctx| {
        lenient(ctx, |args| match *args {
            [start] if start >= 0 => Some(format!("[position() > {start}]")),
            [start, end] if start >= 0 && end >= start => Some(format!(
                "[position() > {start} and position() <= {end}]"
            )),
            _ => None,
        })
    });
    registry.register("between", |ctx| {
        lenient(ctx, |args| between("position()", args))
    });

    registry.register("text-length-between", |ctx| {
        lenient(ctx, |args| between(TEXT_LENGTH, args))
    });
    registry.register("text-length-gt", |ctx| {
        lenient(ctx, |args| compare(TEXT_LENGTH, ">", args))
    });
    registry.register("text-length-lt", |ctx| {
        lenient(ctx, |args| compare(TEXT_LENGTH, "<", args))
    });

    registry.register("attr-length-between", |ctx| attr_length(ctx, None));
    registry.register("attr-length-gt", |ctx| attr_length(ctx, Some(">")));
    registry.register("attr-length-lt", |ctx| attr_length(ctx, Some("<")));
    registry.register("attr-length-eq", |ctx| attr_length(ctx, Some("=")));

    registry.register("depth", |ctx| lenient(ctx, |args| compare(DEPTH, "=", args)));
    registry.register("depth-between", |ctx| {
        lenient(ctx, |args| between(DEPTH, args))
    });

    registry.register("children", |ctx| {
        lenient(ctx, |args| compare(CHILDREN, "=", args))
    });
    registry.register("children-between", |ctx| {
        lenient(ctx, |args| between(CHILDREN, args))
    });
    registry.register("children-gt", |ctx| {
        lenient(ctx, |args| compare(CHILDREN, ">", args))
    });
    registry.register("children-lt", |ctx| {
        lenient(ctx, |args| compare(CHILDREN, "<", args))
    });
}

/// Numbers separated by `,` or `:`; `None` if any piece is not an integer.
pub fn parse_numbers(argument: &str) -> Option<Vec<i64>> {
    if argument.trim().is_empty() {
        return None;
    }
    argument
        .split([',', ':'])
        .map(|piece| piece.trim().parse().ok())
        .collect()
}

fn lenient(
    ctx: &PseudoContext<'_, '_>,
    build: impl FnOnce(&[i64]) -> Option<String>,
) -> Result<String, PseudoError> {
    lenient_with(ctx, ctx.argument(), build)
}

fn between(subject: &str, args: &[i64]) -> Option<String> {
    match *args {
        [low, high] if low <= high => Some(format!(
            "[{subject} >= {low} and {subject} <= {high}]"
        )),
        _ => None,
    }
}

fn compare(subject: &str, op: &str, args: &[i64]) -> Option<String> {
    match *args {
        [n] => Some(format!("[{subject} {op} {n}]")),
        _ => None,
    }
}

/// `attr-length-*(name, n...)`: the first piece is the attribute name.
fn attr_length(ctx: &PseudoContext<'_, '_>, op: Option<&str>) -> Result<String, PseudoError> {
    let argument = ctx.argument();
    let (name, rest) = argument.split_once([',', ':']).unwrap_or((argument, ""));
    let name = name.trim().trim_start_matches('@');
    if !is_attribute_name(name) {
        log::debug!("malformed `:{}({argument})` matches everything", ctx.name());
        return Ok(MATCH_ALL.to_string());
    }

    let subject = format!("string-length(@{name})");
    lenient_with(ctx, rest, |args| match op {
        None => between(&subject, args),
        Some(op) => compare(&subject, op, args),
    })
}

fn lenient_with(
    ctx: &PseudoContext<'_, '_>,
    argument: &str,
    build: impl FnOnce(&[i64]) -> Option<String>,
) -> Result<String, PseudoError> {
    let predicate = parse_numbers(argument).and_then(|args| build(&args));
    Ok(predicate.unwrap_or_else(|| {
        log::debug!(
            "malformed `:{}({})` matches everything",
            ctx.name(),
            ctx.argument()
        );
        MATCH_ALL.to_string()
    }))
}

/// XML name characters only, so the name can be spliced after `@`.
pub(crate) fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
