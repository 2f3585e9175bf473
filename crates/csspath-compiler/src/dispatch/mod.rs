//! Top-level entry point: expression type dispatch, validation and caching.

mod cache;
mod compiler;
mod options;
pub mod regex;
pub mod xpath;

#[cfg(test)]
mod compiler_tests;

pub use cache::{CacheEntry, CacheKey, MemoryCache, SelectorCache, global_cache};
pub use compiler::{Compilation, Compiler};
pub use options::{CompileOptions, DEFAULT_RECURSION_LIMIT, GeneralSibling, LiteralQuoting};

use csspath_core::ExpressionType;

/// [`Compiler::compile`] with default options and the global cache.
pub fn compile(expression: &str, expression_type: ExpressionType) -> crate::Result<String> {
    Compiler::new().compile(expression, expression_type)
}

/// [`compile`] with the type given by name (`css`, `xpath` or `regex`).
pub fn compile_as(expression: &str, expression_type: &str) -> crate::Result<String> {
    Compiler::new().compile_as(expression, expression_type)
}

/// Every entry of the global cache, in insertion order.
pub fn cache_entries() -> Vec<(CacheKey, CacheEntry)> {
    global_cache().entries()
}

/// Replaces the whole global cache.
pub fn replace_cache(entries: Vec<(CacheKey, CacheEntry)>) {
    global_cache().replace(entries);
}

pub fn clear_cache() {
    global_cache().clear();
}
