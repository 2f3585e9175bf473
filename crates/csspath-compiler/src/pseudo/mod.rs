//! Pseudo-class registry.
//!
//! Every supported pseudo-class maps to a [`PseudoHandler`] producing one XPath
//! predicate (`[...]`). Handlers are grouped by family, each family module
//! registering its own names.

mod context;
mod logical;
mod nth;
mod positional;
mod range;
mod state;
mod structural;
mod text;

#[cfg(test)]
mod logical_tests;
#[cfg(test)]
mod tests;

pub use context::{PseudoContext, PseudoError};
pub use nth::{Formula, parse_formula};

use std::sync::LazyLock;

use csspath_core::Pseudo;
use indexmap::IndexMap;
use rowan::{TextRange, TextSize};

use crate::compile::Translator;
use crate::diagnostics::Diagnostics;
use crate::dispatch::CompileOptions;

pub type PseudoHandler = fn(&mut PseudoContext<'_, '_>) -> Result<String, PseudoError>;

/// Name to handler map, in registration order.
#[derive(Default)]
pub struct PseudoRegistry {
    handlers: IndexMap<&'static str, PseudoHandler>,
}

static REGISTRY: LazyLock<PseudoRegistry> = LazyLock::new(PseudoRegistry::builtin);

/// The built-in registry, created on first use.
pub fn registry() -> &'static PseudoRegistry {
    &REGISTRY
}

impl PseudoRegistry {
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        structural::register(&mut registry);
        positional::register(&mut registry);
        range::register(&mut registry);
        logical::register(&mut registry);
        text::register(&mut registry);
        state::register(&mut registry);
        registry
    }

    /// Later registrations replace earlier ones under the same name.
    pub fn register(&mut self, name: &'static str, handler: PseudoHandler) {
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, name: &str) -> Option<PseudoHandler> {
        self.handlers.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Compiles a single pseudo-class on its own: `(name, argument, tag) -> predicate`.
///
/// Unknown names yield `""`. Diagnostic spans are relative to `argument`.
pub fn compile_pseudo(
    name: &str,
    argument: Option<&str>,
    tag: &str,
    options: &CompileOptions,
) -> Result<String, Diagnostics> {
    let mut translator = Translator::new(options);
    let span = TextRange::up_to(TextSize::of(argument.unwrap_or("")));
    let pseudo = Pseudo::class(name.to_ascii_lowercase(), argument.map(str::to_string));
    translator.compile_pseudo(&pseudo, tag, span)
}
