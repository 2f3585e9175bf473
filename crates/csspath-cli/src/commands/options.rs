//! Compile options from `--config` and the option flags.

use std::fs;
use std::path::{Path, PathBuf};

use csspath_compiler::{CompileOptions, GeneralSibling, LiteralQuoting};

use super::input::InputError;

/// Option flags as given on the command line; `None` leaves the config value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionFlags {
    pub config: Option<PathBuf>,
    pub escape_literals: bool,
    pub general_sibling: Option<GeneralSibling>,
    pub recursion_limit: Option<usize>,
}

impl OptionFlags {
    /// Config file first, flags on top.
    pub fn resolve(&self) -> Result<CompileOptions, InputError> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => CompileOptions::default(),
        };
        Ok(self.apply(base))
    }

    pub fn apply(&self, mut options: CompileOptions) -> CompileOptions {
        if self.escape_literals {
            options = options.with_literal_quoting(LiteralQuoting::Escaped);
        }
        if let Some(general_sibling) = self.general_sibling {
            options = options.with_general_sibling(general_sibling);
        }
        if let Some(limit) = self.recursion_limit {
            options = options.with_recursion_limit(limit);
        }
        options
    }
}

fn load_config(path: &Path) -> Result<CompileOptions, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let options = serde_json::from_str(&content).map_err(|source| InputError::Config {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("loaded options from '{}': {options:?}", path.display());
    Ok(options)
}
