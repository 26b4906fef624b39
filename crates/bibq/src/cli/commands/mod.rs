//! Command implementations and dispatch.

pub mod arg;
pub mod check;
pub mod compile;
pub mod config;
pub mod init;
pub mod strip;
pub mod wash;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Compile(cmd) => compile::run(ctx, &cmd),
        Commands::Wash { pattern } => wash::run(&pattern),
        Commands::Strip { text } => strip::run(&text),
        Commands::Arg(cmd) => arg::run(&cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
