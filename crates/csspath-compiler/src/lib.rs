//! csspath compiler: CSS selectors to XPath 1.0.
//!
//! The pipeline, leaf to root:
//! - `parser` - lexer, lossless CST, and typed AST for one complex selector
//! - `selector` - selector-list splitting and segment assembly
//! - `compile` - segment and attribute compilers
//! - `pseudo` - pseudo-class registry
//! - `dispatch` - the [`Compiler`] entry point, options and cache
//! - `diagnostics` - error reporting
//!
//! # Example
//!
//! ```
//! use csspath_compiler::{Compiler, ExpressionType, MemoryCache};
//! use std::sync::Arc;
//!
//! let compiler = Compiler::new().with_cache(Arc::new(MemoryCache::new()));
//! let xpath = compiler.compile("div > p", ExpressionType::Css).unwrap();
//! assert_eq!(xpath, "//div/p");
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;
pub mod diagnostics;
pub mod dispatch;
pub mod parser;
pub mod pseudo;
pub mod selector;

pub use csspath_core::{ExpressionType, Segment};
pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use dispatch::{
    CacheEntry, CacheKey, CompileOptions, Compiler, GeneralSibling, LiteralQuoting, MemoryCache,
    SelectorCache, cache_entries, clear_cache, compile, compile_as, global_cache, replace_cache,
};

/// Errors raised at the compiler boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Empty input, malformed selector syntax, invalid regex, or unbalanced XPath.
    #[error("invalid selector `{selector}`: {}", .diagnostics.summary())]
    InvalidSelector {
        selector: String,
        diagnostics: Diagnostics,
    },

    #[error("unsupported expression type `{0}` (expected css, xpath or regex)")]
    UnsupportedExpressionType(String),
}

impl Error {
    pub(crate) fn invalid(selector: impl Into<String>, diagnostics: Diagnostics) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            diagnostics,
        }
    }

    /// Diagnostics attached to an [`Error::InvalidSelector`].
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::InvalidSelector { diagnostics, .. } => Some(diagnostics),
            Self::UnsupportedExpressionType(_) => None,
        }
    }
}

impl From<csspath_core::UnknownExpressionType> for Error {
    fn from(err: csspath_core::UnknownExpressionType) -> Self {
        Self::UnsupportedExpressionType(err.0)
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
