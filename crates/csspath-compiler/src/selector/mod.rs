//! From selector text to [`Segment`](csspath_core::Segment)s.
//!
//! A selector list is first cut on its top-level commas ([`split_selector_list`]);
//! each fragment is then parsed and assembled into an ordered sequence of
//! combinator + compound steps ([`assemble`]).

mod assemble;
mod split;


pub use assemble::{AssembledSelector, assemble, parse_selector, parse_selector_list};
pub use split::{Fragment, split_selector_list};
