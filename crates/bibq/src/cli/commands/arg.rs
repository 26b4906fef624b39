//! Implementation of `bibq arg`.

use std::process::ExitCode;

use bibq_query::{UrlArgument, wash_url_argument};

use crate::cli::{args::ArgCommand, output::print_json};

/// Washes argument values to the requested kind and prints the result as JSON.
pub fn run(cmd: &ArgCommand) -> ExitCode {
    let value = to_argument(&cmd.values, cmd.sequence);
    print_json(&wash_url_argument(&value, cmd.kind))
}

/// Builds the raw argument: a scalar for a single value, a sequence otherwise.
fn to_argument(values: &[String], sequence: bool) -> UrlArgument {
    match values {
        [single] if !sequence => UrlArgument::Scalar(single.clone()),
        _ => UrlArgument::Sequence(values.to_vec()),
    }
}
