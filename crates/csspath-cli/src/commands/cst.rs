use csspath_compiler::parser::parse;

pub struct CstArgs {
    pub selector: String,
    pub color: bool,
}

/// Prints the tree even when it has errors; `Error` nodes show where.
pub fn run(args: CstArgs) {
    let (parse, diagnostics) = parse(&args.selector);
    print!("{}", parse.dump_cst());

    if !diagnostics.is_empty() {
        eprintln!("{}", diagnostics.render_colored(&args.selector, args.color));
    }
    if diagnostics.has_errors() {
        std::process::exit(1);
    }
}
