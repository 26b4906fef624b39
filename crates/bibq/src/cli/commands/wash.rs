//! Implementation of `bibq wash`.

use std::process::ExitCode;

use bibq_query::wash_pattern;

/// Prints the washed form of a pattern.
pub fn run(pattern: &str) -> ExitCode {
    println!("{}", wash_pattern(pattern));
    ExitCode::SUCCESS
}
