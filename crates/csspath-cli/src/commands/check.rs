use std::path::PathBuf;

use csspath_compiler::Compiler;
use csspath_core::ExpressionType;

use super::compile::{render_diagnostics, render_error};
use super::input::load_selectors;
use super::options::OptionFlags;

pub struct CheckArgs {
    pub selectors: Vec<String>,
    pub selector_file: Option<PathBuf>,
    pub expression_type: ExpressionType,
    pub strict: bool,
    pub options: OptionFlags,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
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

    // Checking never reads or fills the cache.
    let compiler = Compiler::new().with_options(options);
    let mut failed = 0usize;

    for input in &selectors {
        match compiler.compile_uncached(&input.text, args.expression_type) {
            Ok(compilation) => {
                if args.strict && !compilation.warnings.is_empty() {
                    eprintln!(
                        "{}",
                        render_diagnostics(
                            &compilation.warnings,
                            input.text.trim(),
                            input.location.as_ref(),
                            args.color,
                        )
                    );
                    failed += 1;
                }
            }
            Err(e) => {
                eprintln!("{}", render_error(&e, input.location.as_ref(), args.color));
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::info!("{failed} of {} selectors failed", selectors.len());
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
