//! Fixed predicates: links, form state, dynamic state, visibility and
//! element groups. They approximate HTML semantics from attributes alone.

use super::{PseudoContext, PseudoError, PseudoRegistry};

const STYLE: &str = r#"translate(@style, " ", "")"#;

const FIXED: &[(&str, &str)] = &[
    // links
    ("link", "[(self::a or self::area) and @href]"),
    ("any-link", "[(self::a or self::area) and @href]"),
    (
        "external",
        r#"[starts-with(@href, "http://") or starts-with(@href, "https://") or starts-with(@href, "//")]"#,
    ),
    (
        "internal",
        r#"[@href and not(starts-with(@href, "http://") or starts-with(@href, "https://") or starts-with(@href, "//"))]"#,
    ),
    ("anchor", r##"[starts-with(@href, "#")]"##),
    ("mailto", r#"[starts-with(@href, "mailto:")]"#),
    ("tel-link", r#"[starts-with(@href, "tel:")]"#),
    // form state
    (
        "enabled",
        "[(self::button or self::input or self::select or self::textarea or self::option or self::optgroup or self::fieldset) and not(@disabled)]",
    ),
    ("disabled", "[@disabled]"),
    ("checked", "[@checked or @selected]"),
    (
        "unchecked",
        r#"[(@type="checkbox" or @type="radio") and not(@checked)]"#,
    ),
    ("selected", "[@selected]"),
    (
        "indeterminate",
        "[@indeterminate or (self::progress and not(@value))]",
    ),
    ("default", "[@checked or @selected or @default]"),
    ("required", "[@required]"),
    (
        "optional",
        "[(self::input or self::select or self::textarea) and not(@required)]",
    ),
    ("read-only", "[@readonly or @disabled]"),
    (
        "read-write",
        r#"[((self::input or self::textarea) and not(@readonly) and not(@disabled)) or @contenteditable="true" or @contenteditable=""]"#,
    ),
    (
        "placeholder-shown",
        r#"[@placeholder and (not(@value) or @value="")]"#,
    ),
    ("focus", "[@autofocus]"),
    ("autofocus", "[@autofocus]"),
    // no pointer, no focus ring, no history in a static document
    ("hover", "[false()]"),
    ("active", "[false()]"),
    ("focus-visible", "[false()]"),
    ("focus-within", "[false()]"),
    ("target", "[false()]"),
    ("visited", "[false()]"),
    // form element filters
    (
        "input",
        "[self::input or self::textarea or self::select or self::button]",
    ),
    ("button", r#"[self::button or (self::input and @type="button")]"#),
    ("text", r#"[self::input and (not(@type) or @type="text")]"#),
    ("password", r#"[self::input and @type="password"]"#),
    ("radio", r#"[self::input and @type="radio"]"#),
    ("checkbox", r#"[self::input and @type="checkbox"]"#),
    (
        "submit",
        r#"[(self::input or self::button) and @type="submit"]"#,
    ),
    ("reset", r#"[(self::input or self::button) and @type="reset"]"#),
    ("file", r#"[self::input and @type="file"]"#),
    ("image", r#"[self::input and @type="image"]"#),
    ("email", r#"[self::input and @type="email"]"#),
    ("url", r#"[self::input and @type="url"]"#),
    ("number", r#"[self::input and @type="number"]"#),
    ("search", r#"[self::input and @type="search"]"#),
    ("tel", r#"[self::input and @type="tel"]"#),
    ("date", r#"[self::input and @type="date"]"#),
    ("color", r#"[self::input and @type="color"]"#),
    ("range", r#"[self::input and @type="range"]"#),
    ("form", "[self::form]"),
    // element groups
    (
        "header",
        "[self::h1 or self::h2 or self::h3 or self::h4 or self::h5 or self::h6]",
    ),
    ("list", "[self::ul or self::ol or self::dl]"),
    (
        "table",
        "[self::table or self::thead or self::tbody or self::tfoot or self::tr or self::th or self::td]",
    ),
    (
        "media",
        "[self::img or self::video or self::audio or self::picture or self::canvas or self::svg]",
    ),
    ("scope", "[not(parent::*)]"),
    // custom elements carry a hyphen and are never defined without script
    ("defined", r#"[not(contains(name(), "-"))]"#),
];

pub(super) fn register(registry: &mut PseudoRegistry) {
    for &(name, _) in FIXED {
        registry.register(name, fixed);
    }
    registry.register("visible", |_| Ok(visibility(false)));
    registry.register("hidden", |_| Ok(visibility(true)));
    registry.register("heading", heading);
}

fn fixed(ctx: &mut PseudoContext<'_, '_>) -> Result<String, PseudoError> {
    Ok(FIXED
        .iter()
        .find(|(name, _)| *name == ctx.name())
        .map(|(_, predicate)| predicate.to_string())
        .unwrap_or_default())
}

/// `hidden` attribute, hidden inputs and inline `display:none`/`visibility:hidden`.
fn visibility(hidden: bool) -> String {
    let conditions = [
        "@hidden".to_string(),
        r#"@type="hidden""#.to_string(),
        format!(r#"contains({STYLE}, "display:none")"#),
        format!(r#"contains({STYLE}, "visibility:hidden")"#),
    ];
    if hidden {
        format!("[{}]", conditions.join(" or "))
    } else {
        let negated: Vec<String> = conditions.iter().map(|c| format!("not({c})")).collect();
        format!("[{}]", negated.join(" and "))
    }
}

/// `:heading` or `:heading(1, 2)` for specific levels.
fn heading(ctx: &mut PseudoContext<'_, '_>) -> Result<String, PseudoError> {
    let levels: Vec<u8> = match ctx.argument() {
        "" => (1..=6).collect(),
        arg => arg
            .split(',')
            .map(|level| match level.trim().parse::<u8>() {
                Ok(n @ 1..=6) => Ok(n),
                _ => Err(PseudoError::invalid(format!(
                    "`{}` is not a heading level between 1 and 6",
                    level.trim()
                ))),
            })
            .collect::<Result<_, _>>()?,
    };
    let tests: Vec<String> = levels.iter().map(|n| format!("self::h{n}")).collect();
    Ok(format!("[{}]", tests.join(" or ")))
}
