//! Tree-structural pseudo-classes.

use super::nth::{Counting, nth_predicate};
use super::{PseudoContext, PseudoError, PseudoRegistry};

pub(super) fn register(registry: &mut PseudoRegistry) {
    registry.register("root", |_| Ok("[not(parent::*)]".to_string()));
    registry.register("empty", |_| Ok("[not(*) and not(text())]".to_string()));
    registry.register("blank", |_| {
        Ok("[not(*) and not(normalize-space())]".to_string())
    });
    registry.register("parent", |_| Ok("[* or text()]".to_string()));

    registry.register("first-child", |_| {
        Ok("[not(preceding-sibling::*)]".to_string())
    });
    registry.register("last-child", |_| {
        Ok("[not(following-sibling::*)]".to_string())
    });
    registry.register("only-child", |_| {
        Ok("[not(preceding-sibling::*) and not(following-sibling::*)]".to_string())
    });

    registry.register("first-of-type", |ctx| {
        Ok(format!("[not(preceding-sibling::{})]", ctx.tag()))
    });
    registry.register("last-of-type", |ctx| {
        Ok(format!("[not(following-sibling::{})]", ctx.tag()))
    });
    registry.register("only-of-type", |ctx| {
        let tag = ctx.tag();
        Ok(format!(
            "[not(preceding-sibling::{tag}) and not(following-sibling::{tag})]"
        ))
    });

    registry.register("nth-child", |ctx| nth(ctx, Counting::Child));
    registry.register("nth-last-child", |ctx| nth(ctx, Counting::LastChild));
    registry.register("nth-of-type", |ctx| nth(ctx, Counting::OfType));
    registry.register("nth-last-of-type", |ctx| nth(ctx, Counting::LastOfType));
}

fn nth(ctx: &mut PseudoContext<'_, '_>, counting: Counting) -> Result<String, PseudoError> {
    nth_predicate(ctx.argument(), counting, ctx.tag())
}
