//! Text content and attribute-presence filters.

use super::range::is_attribute_name;
use super::{PseudoContext, PseudoError, PseudoRegistry};
use crate::compile::literal::lowercased;

pub(super) fn register(registry: &mut PseudoRegistry) {
    registry.register("contains", |ctx| {
        let text = ctx.text_argument()?;
        Ok(format!("[contains(., {})]", ctx.quote(&text)))
    });
    registry.register("icontains", |ctx| {
        let text = ctx.text_argument()?.to_lowercase();
        Ok(format!("[contains({}, {})]", lowercased("."), ctx.quote(&text)))
    });
    registry.register("contains-own", |ctx| {
        let text = ctx.text_argument()?;
        Ok(format!("[text()[contains(., {})]]", ctx.quote(&text)))
    });
    registry.register("starts-with", |ctx| {
        let text = ctx.text_argument()?;
        Ok(format!(
            "[starts-with(normalize-space(.), {})]",
            ctx.quote(&text)
        ))
    });
    registry.register("ends-with", |ctx| {
        let lit = ctx.quote(&ctx.text_argument()?);
        Ok(format!(
            "[substring(normalize-space(.), string-length(normalize-space(.)) - string-length({lit}) + 1) = {lit}]"
        ))
    });
    registry.register("text-equals", |ctx| {
        let text = ctx.text_argument()?;
        Ok(format!("[normalize-space(.) = {}]", ctx.quote(&text)))
    });
    registry.register("has-text", |_| Ok("[normalize-space(.)]".to_string()));
    registry.register("no-text", |_| Ok("[not(normalize-space(.))]".to_string()));

    // The nearest `lang` attribute on the element or an ancestor decides.
    registry.register("lang", |ctx| {
        let code = ctx.text_argument()?.to_lowercase();
        let attr = lowercased("@lang");
        Ok(format!(
            "[ancestor-or-self::*[@lang][1][{attr} = {} or starts-with({attr}, {})]]",
            ctx.quote(&code),
            ctx.quote(&format!("{code}-"))
        ))
    });

    registry.register("has-attr", |ctx| {
        let name = attribute_argument(ctx)?;
        Ok(format!("[@{name}]"))
    });
    registry.register("no-attr", |ctx| {
        let name = attribute_argument(ctx)?;
        Ok(format!("[not(@{name})]"))
    });
    // `:data(key)` or `:data(key=value)`
    registry.register("data", |ctx| {
        let arg = ctx.require_argument("a data attribute key")?;
        let (key, value) = match arg.split_once('=') {
            Some((key, value)) => (key.trim(), Some(super::context::unquote(value.trim()))),
            None => (arg, None),
        };
        let key = key.strip_prefix("data-").unwrap_or(key);
        if !is_attribute_name(key) {
            return Err(PseudoError::invalid(format!("`{key}` is not an attribute name")));
        }
        Ok(match value {
            Some(value) => format!("[@data-{key}={}]", ctx.quote(&value)),
            None => format!("[@data-{key}]"),
        })
    });
}

fn attribute_argument<'a>(ctx: &PseudoContext<'a, '_>) -> Result<&'a str, PseudoError> {
    let arg = ctx.require_argument("an attribute name")?;
    let name = arg.strip_prefix('@').unwrap_or(arg);
    if is_attribute_name(name) {
        Ok(name)
    } else {
        Err(PseudoError::invalid(format!("`{arg}` is not an attribute name")))
    }
}
