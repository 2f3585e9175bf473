//! jQuery-style positional filters. Indices are 0-based, positions 1-based.

use super::{PseudoContext, PseudoError, PseudoRegistry};

pub(super) fn register(registry: &mut PseudoRegistry) {
    registry.register("first", |_| Ok("[position() = 1]".to_string()));
    registry.register("last", |_| Ok("[position() = last()]".to_string()));
    // Index 0 is position 1, so "even" indices sit at odd positions.
    registry.register("even", |_| Ok("[position() mod 2 = 1]".to_string()));
    registry.register("odd", |_| Ok("[position() mod 2 = 0]".to_string()));

    registry.register("eq", |ctx| {
        let index = index_argument(ctx)?;
        Ok(format!("[position() = {}]", position_of(index)))
    });
    registry.register("gt", |ctx| {
        let index = index_argument(ctx)?;
        Ok(format!("[position() > {}]", position_of(index)))
    });
    registry.register("lt", |ctx| {
        let index = index_argument(ctx)?;
        Ok(format!("[position() < {}]", position_of(index)))
    });
}

/// XPath position of a 0-based index; negative indices count from the end.
fn position_of(index: i64) -> String {
    match index {
        0.. => (i128::from(index) + 1).to_string(),
        -1 => "last()".to_string(),
        // -2 is `last() - 1`; `index + 1` cannot overflow here.
        _ => format!("last() - {}", (index + 1).unsigned_abs()),
    }
}

fn index_argument(ctx: &PseudoContext<'_, '_>) -> Result<i64, PseudoError> {
    let arg = ctx.require_argument("an index")?;
    arg.parse()
        .map_err(|_| PseudoError::invalid(format!("`{arg}` is not an integer index")))
}
