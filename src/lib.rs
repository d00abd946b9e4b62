pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod coverage;
pub mod duration;
pub mod error;
pub mod logging;
pub mod merge;
pub mod profile;
pub mod runner;
pub mod scanner;
pub mod scratch;

pub use error::{GocoverdirError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_COVERAGE_BELOW_THRESHOLD: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
