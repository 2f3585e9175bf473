//! Grammar productions for CSS selectors.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! A single left-to-right pass builds the whole tree; nothing is re-scanned.

mod attributes;
mod pseudos;
mod selectors;
