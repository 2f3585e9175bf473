mod cli;
mod commands;

use cli::{CheckParams, CompileParams, CstParams, PseudosParams, SegmentsParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let verbosity = matches
        .subcommand()
        .map(|(_, m)| m.get_count("verbose"))
        .unwrap_or(0);
    init_logging(verbosity);

    match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("segments", m)) => {
            let params = SegmentsParams::from_matches(m);
            commands::segments::run(params.into());
        }
        Some(("cst", m)) => {
            let params = CstParams::from_matches(m);
            commands::cst::run(params.into());
        }
        Some(("pseudos", m)) => {
            let params = PseudosParams::from_matches(m);
            commands::pseudos::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
