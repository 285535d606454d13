//! Command line interface.

pub mod build;
pub mod codelets;
pub mod completions;
pub mod generate;
pub mod run;
pub mod utils;
