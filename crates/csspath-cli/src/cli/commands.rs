//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Flags that map onto `CompileOptions`.
fn with_option_args(cmd: Command) -> Command {
    cmd.arg(config_arg())
        .arg(escape_literals_arg())
        .arg(general_sibling_arg())
        .arg(recursion_limit_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("csspath")
        .about("Compile CSS selectors to XPath 1.0")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(compile_command())
        .subcommand(check_command())
        .subcommand(segments_command())
        .subcommand(cst_command())
        .subcommand(pseudos_command())
}

/// Compile selectors, one result per line.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile selectors to XPath")
        .override_usage(
            "\
  csspath compile <SELECTOR>...
  csspath compile -f <FILE>
  csspath compile -t xpath <EXPR>...",
        )
        .after_help(
            r#"EXAMPLES:
  csspath compile 'div > p'                  # //div/p
  csspath compile 'a[href^="http"]' --json   # [{"selector": ..., "xpath": ...}]
  csspath compile -f selectors.txt           # one selector per line
  csspath compile -t regex '/^\d+$/i'        # validate a regex"#,
        )
        .arg(selectors_arg())
        .arg(selector_file_arg())
        .arg(type_arg())
        .arg(json_arg())
        .arg(color_arg())
        .arg(verbose_arg());

    with_option_args(cmd)
}

/// Validate selectors.
///
/// Silent on success, like `cargo check`.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate selectors")
        .after_help(
            r#"EXAMPLES:
  csspath check 'ul > li:nth-child(2n+1)'
  csspath check -f selectors.txt --strict    # fail on warnings too"#,
        )
        .arg(selectors_arg())
        .arg(selector_file_arg())
        .arg(type_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg());

    with_option_args(cmd)
}

/// Print the assembled segments of a selector list as JSON.
pub fn segments_command() -> Command {
    Command::new("segments")
        .about("Show the assembled segments of a selector")
        .arg(selector_arg())
        .arg(compact_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print the concrete syntax tree of a selector.
pub fn cst_command() -> Command {
    Command::new("cst")
        .about("Show the concrete syntax tree of a selector")
        .arg(selector_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// List registered pseudo-classes.
pub fn pseudos_command() -> Command {
    Command::new("pseudos")
        .about("List supported pseudo-classes")
        .arg(verbose_arg())
}
