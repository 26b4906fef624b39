//! Implementation of `bibq strip`.

use std::process::ExitCode;

use bibq_query::strip_accents;

/// Prints text with its accents removed.
pub fn run(text: &str) -> ExitCode {
    println!("{}", strip_accents(text));
    ExitCode::SUCCESS
}
