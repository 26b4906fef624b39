//! Clap argument definitions for the `bibq` CLI.

use bibq_query::{ArgKind, MatchingMode, UnitError};
use clap::{ArgAction, Args, Parser, Subcommand};

/// Parses a matching mode name or legacy code.
fn parse_mode(s: &str) -> Result<MatchingMode, String> {
    s.parse().map_err(|e: UnitError| with_hint(&e))
}

/// Parses an argument kind name.
fn parse_kind(s: &str) -> Result<ArgKind, String> {
    s.parse().map_err(|e: UnitError| with_hint(&e))
}

/// Formats a vocabulary error with the list of accepted values.
fn with_hint(err: &UnitError) -> String {
    format!("{err} ({})", err.suggestion())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "bibq")]
#[command(about = "Compile bibliographic search patterns into basic search units")]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `bibq` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a search pattern into basic search units
    Compile(CompileCommand),

    /// Clean a pattern before compilation
    Wash {
        /// Pattern to wash
        #[arg(allow_hyphen_values = true)]
        pattern: String,
    },

    /// Remove accents from text
    Strip {
        /// Text to normalize
        text: String,
    },

    /// Coerce request argument values to a kind
    Arg(ArgCommand),

    /// Initialize bibq configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show the effective configuration
    Config,
}

impl Commands {
    /// Returns true if the command runs against the merged configuration.
    pub fn needs_config(&self) -> bool {
        match self {
            Self::Compile(cmd) => !cmd.no_config,
            Self::Config => true,
            Self::Wash { .. } | Self::Strip { .. } | Self::Arg(_) | Self::Init(_) | Self::Check => {
                false
            }
        }
    }
}

/// Arguments for `bibq compile`.
#[derive(Args, Debug, Clone)]
pub struct CompileCommand {
    /// Search pattern
    #[arg(allow_hyphen_values = true)]
    pub pattern: String,

    /// Field applied where the pattern has no prefix [default: from config]
    #[arg(short = 'f', long)]
    pub field: Option<String>,

    /// Matching mode: all, any, exact, partial, regexp [default: from config]
    #[arg(short = 'm', long, value_parser = parse_mode)]
    pub mode: Option<MatchingMode>,

    /// Output units as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Wash the pattern before compiling
    #[arg(long)]
    pub wash: bool,

    /// Ignore configuration files
    #[arg(long)]
    pub no_config: bool,
}

/// Arguments for `bibq arg`.
#[derive(Args, Debug, Clone)]
pub struct ArgCommand {
    /// Target kind: int, str, list
    #[arg(short = 'k', long, value_parser = parse_kind)]
    pub kind: ArgKind,

    /// Treat a single value as a one-element sequence
    #[arg(long)]
    pub sequence: bool,

    /// Argument values; several values form a sequence
    #[arg(required = true, allow_hyphen_values = true)]
    pub values: Vec<String>,
}

/// Arguments for `bibq init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.bibq.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}
