//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch to command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use csspath_compiler::GeneralSibling;
use csspath_core::ExpressionType;

use super::ColorChoice;
use super::args::SiblingMode;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::cst::CstArgs;
use crate::commands::options::OptionFlags;
use crate::commands::pseudos::PseudosArgs;
use crate::commands::segments::SegmentsArgs;

pub struct CompileParams {
    pub selectors: Vec<String>,
    pub selector_file: Option<PathBuf>,
    pub expression_type: ExpressionType,
    pub json: bool,
    pub options: OptionFlags,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selectors: parse_selectors(m),
            selector_file: m.get_one::<PathBuf>("selector_file").cloned(),
            expression_type: parse_type(m),
            json: m.get_flag("json"),
            options: parse_option_flags(m),
            color: parse_color(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            selectors: p.selectors,
            selector_file: p.selector_file,
            expression_type: p.expression_type,
            json: p.json,
            options: p.options,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub selectors: Vec<String>,
    pub selector_file: Option<PathBuf>,
    pub expression_type: ExpressionType,
    pub strict: bool,
    pub options: OptionFlags,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selectors: parse_selectors(m),
            selector_file: m.get_one::<PathBuf>("selector_file").cloned(),
            expression_type: parse_type(m),
            strict: m.get_flag("strict"),
            options: parse_option_flags(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            selectors: p.selectors,
            selector_file: p.selector_file,
            expression_type: p.expression_type,
            strict: p.strict,
            options: p.options,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SegmentsParams {
    pub selector: String,
    pub compact: bool,
    pub color: ColorChoice,
}

impl SegmentsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selector: m.get_one::<String>("selector").cloned().unwrap_or_default(),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<SegmentsParams> for SegmentsArgs {
    fn from(p: SegmentsParams) -> Self {
        Self {
            selector: p.selector,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CstParams {
    pub selector: String,
    pub color: ColorChoice,
}

impl CstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            selector: m.get_one::<String>("selector").cloned().unwrap_or_default(),
            color: parse_color(m),
        }
    }
}

impl From<CstParams> for CstArgs {
    fn from(p: CstParams) -> Self {
        Self {
            selector: p.selector,
            color: p.color.should_colorize(),
        }
    }
}

pub struct PseudosParams;

impl PseudosParams {
    pub fn from_matches(_m: &ArgMatches) -> Self {
        Self
    }
}

impl From<PseudosParams> for PseudosArgs {
    fn from(_: PseudosParams) -> Self {
        Self
    }
}

fn parse_selectors(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("selectors")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_type(m: &ArgMatches) -> ExpressionType {
    m.get_one::<String>("type")
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn parse_option_flags(m: &ArgMatches) -> OptionFlags {
    OptionFlags {
        config: m.get_one::<PathBuf>("config").cloned(),
        escape_literals: m.get_flag("escape_literals"),
        general_sibling: m
            .get_one::<SiblingMode>("general_sibling")
            .map(|mode| match mode {
                SiblingMode::First => GeneralSibling::FirstOnly,
                SiblingMode::Any => GeneralSibling::AnyFollowing,
            }),
        recursion_limit: m.get_one::<usize>("recursion_limit").copied(),
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
