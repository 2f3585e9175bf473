pub mod check;
pub mod compile;
pub mod cst;
pub mod input;
pub mod options;
pub mod pseudos;
pub mod segments;

#[cfg(test)]
mod options_tests;
