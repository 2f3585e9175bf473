use csspath_compiler::{Compiler, Segment};

use super::compile::render_error;

pub struct SegmentsArgs {
    pub selector: String,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: SegmentsArgs) {
    let segments = match Compiler::new().segments(&args.selector) {
        Ok(segments) => segments,
        Err(e) => {
            eprintln!("{}", render_error(&e, None, args.color));
            std::process::exit(1);
        }
    };

    println!("{}", render_segments(&segments, args.compact));
}

/// One array of segments per selector in the list.
pub fn render_segments(segments: &[Vec<Segment>], compact: bool) -> String {
    let json = if compact {
        serde_json::to_string(segments)
    } else {
        serde_json::to_string_pretty(segments)
    };
    json.expect("serialization failed")
}
