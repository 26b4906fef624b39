//! Implementation of `bibq compile`.

use std::process::ExitCode;

use bibq_query::wash_pattern;
use tracing::debug;

use crate::cli::{
    args::CompileCommand,
    context::CommandContext,
    output::{print_json, units_table},
};

/// Compiles a pattern and prints its units.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let pattern = if cmd.wash {
        let washed = wash_pattern(&cmd.pattern);
        debug!(pattern = %washed, "washed pattern");
        washed
    } else {
        cmd.pattern.clone()
    };

    let units = ctx
        .config
        .compile(&pattern, cmd.field.as_deref(), cmd.mode);

    if cmd.json {
        return print_json(&units);
    }
    if units.is_empty() {
        println!("No units.");
        return ExitCode::SUCCESS;
    }
    println!("{}", units_table(&units));
    ExitCode::SUCCESS
}
