//! Selector input: positional arguments, selector files and stdin.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("invalid config '{path}': {source}")]
    Config {
        path: String,
        source: serde_json::Error,
    },

    #[error("no selectors given: use positional arguments, -f/--file, or \"-\" for stdin")]
    Empty,
}

/// A selector together with the file line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorInput {
    pub text: String,
    /// `None` for selectors given as arguments.
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File path, or `<stdin>`.
    pub origin: String,
    /// 1-based.
    pub line: usize,
}

impl SelectorInput {
    fn argument(text: &str) -> Self {
        Self {
            text: text.to_string(),
            location: None,
        }
    }

    fn lines_of(content: &str, origin: &str) -> impl Iterator<Item = Self> {
        parse_lines(content).into_iter().map(move |(line, text)| Self {
            text: text.to_string(),
            location: Some(Location {
                origin: origin.to_string(),
                line,
            }),
        })
    }
}

/// Collects selectors from positional arguments, then from `file`.
///
/// A positional `-` (or `-f -`) reads stdin as a selector file.
pub fn load_selectors(
    positional: &[String],
    file: Option<&Path>,
) -> Result<Vec<SelectorInput>, InputError> {
    let mut selectors = Vec::new();
    let mut stdin_read = false;

    for arg in positional {
        if arg == "-" {
            if !stdin_read {
                selectors.extend(SelectorInput::lines_of(&read_stdin()?, STDIN));
                stdin_read = true;
            }
            continue;
        }
        selectors.push(SelectorInput::argument(arg));
    }

    if let Some(path) = file {
        if path.as_os_str() == "-" {
            if !stdin_read {
                selectors.extend(SelectorInput::lines_of(&read_stdin()?, STDIN));
            }
        } else {
            let origin = path.display().to_string();
            let content = fs::read_to_string(path).map_err(|source| InputError::Read {
                path: origin.clone(),
                source,
            })?;
            selectors.extend(SelectorInput::lines_of(&content, &origin));
        }
    }

    if selectors.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(selectors)
}

const STDIN: &str = "<stdin>";

/// One selector per line, paired with its 1-based line number.
///
/// Blank lines are skipped, as are comments: a `#` followed by whitespace or
/// the end of the line. `#main` stays an id selector.
pub fn parse_lines(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !is_comment(line))
        .collect()
}

fn is_comment(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('#') else {
        return false;
    };
    rest.chars().next().is_none_or(char::is_whitespace)
}

fn read_stdin() -> Result<String, InputError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(InputError::Stdin)?;
    Ok(buf)
}
