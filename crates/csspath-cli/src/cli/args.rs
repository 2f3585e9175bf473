//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ValueEnum, value_parser};

/// Selectors to compile (positional, `-` reads stdin).
pub fn selectors_arg() -> Arg {
    Arg::new("selectors")
        .value_name("SELECTOR")
        .num_args(1..)
        .help("Selectors to process (use \"-\" to read them from stdin)")
}

/// A single selector (positional).
pub fn selector_arg() -> Arg {
    Arg::new("selector")
        .value_name("SELECTOR")
        .required(true)
        .help("Selector to inspect")
}

/// Selector file (-f/--file).
pub fn selector_file_arg() -> Arg {
    Arg::new("selector_file")
        .short('f')
        .long("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read selectors from a file, one per line (use \"-\" for stdin)")
}

/// Expression type (-t/--type).
pub fn type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("TYPE")
        .default_value("css")
        .value_parser(["css", "xpath", "regex"])
        .help("How to interpret the input")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Log verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log cache and compiler activity (-vv for trace)")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print results as JSON")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON instead of pretty-printed")
}

/// Options file (--config).
pub fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Read compile options from a JSON file (flags override it)")
}

/// Escape quotes in literal values (--escape-literals).
pub fn escape_literals_arg() -> Arg {
    Arg::new("escape_literals")
        .long("escape-literals")
        .action(ArgAction::SetTrue)
        .help("Quote literal values safely instead of verbatim")
}

/// `~` compilation mode (--general-sibling).
pub fn general_sibling_arg() -> Arg {
    Arg::new("general_sibling")
        .long("general-sibling")
        .value_name("MODE")
        .value_parser(value_parser!(SiblingMode))
        .help("Compile `~` to the first following sibling or to any of them")
}

/// Pseudo-class nesting limit (--recursion-limit).
pub fn recursion_limit_arg() -> Arg {
    Arg::new("recursion_limit")
        .long("recursion-limit")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Maximum nesting of selector arguments such as `:not(:has(...))`")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SiblingMode {
    /// `following-sibling::tag[1]`, like `+`
    First,
    /// `following-sibling::tag`
    Any,
}
