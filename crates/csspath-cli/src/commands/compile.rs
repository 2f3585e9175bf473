use std::path::PathBuf;

use csspath_compiler::{Compiler, Diagnostics, Error};
use csspath_core::ExpressionType;
use serde::Serialize;

use super::input::{Location, load_selectors};
use super::options::OptionFlags;

pub struct CompileArgs {
    pub selectors: Vec<String>,
    pub selector_file: Option<PathBuf>,
    pub expression_type: ExpressionType,
    pub json: bool,
    pub options: OptionFlags,
    pub color: bool,
}

#[derive(Serialize)]
pub struct CompiledSelector<'a> {
    pub selector: &'a str,
    pub xpath: String,
}

pub fn run(args: CompileArgs) {
    let selectors = match load_selectors(&args.selectors, args.selector_file.as_deref()) {
        Ok(selectors) => selectors,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    let options = match args.options.resolve() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    let compiler = Compiler::new().with_options(options);
    let mut compiled = Vec::with_capacity(selectors.len());
    let mut failed = false;

    for input in &selectors {
        match compiler.compile(&input.text, args.expression_type) {
            Ok(xpath) => compiled.push(CompiledSelector {
                selector: &input.text,
                xpath,
            }),
            Err(e) => {
                eprintln!("{}", render_error(&e, input.location.as_ref(), args.color));
                failed = true;
            }
        }
    }

    print!("{}", render_compiled(&compiled, args.json));

    if failed {
        std::process::exit(1);
    }
}

/// One XPath per line, or a JSON array of `{selector, xpath}` objects.
pub fn render_compiled(compiled: &[CompiledSelector], json: bool) -> String {
    if json {
        let json = serde_json::to_string_pretty(compiled).expect("serialization failed");
        return format!("{json}\n");
    }
    compiled
        .iter()
        .map(|entry| format!("{}\n", entry.xpath))
        .collect()
}

/// Renders the diagnostics of `error` against the selector they point into.
pub fn render_error(error: &Error, location: Option<&Location>, color: bool) -> String {
    match error {
        Error::InvalidSelector {
            selector,
            diagnostics,
        } if !diagnostics.is_empty() => render_diagnostics(diagnostics, selector, location, color),
        _ => format!("error: {}", error),
    }
}

/// Snippet rendering, headed by `file:line:col` when the selector came from a file.
pub fn render_diagnostics(
    diagnostics: &Diagnostics,
    selector: &str,
    location: Option<&Location>,
    color: bool,
) -> String {
    let printer = diagnostics.printer().source(selector).colored(color);
    match location {
        Some(location) => printer.path(&location.origin).line(location.line).render(),
        None => printer.render(),
    }
}
