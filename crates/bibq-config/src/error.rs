//! Error types for bibq configuration.

use std::{io, path::PathBuf};

use bibq_query::UnitError;
use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// `search.matching` names no known matching mode.
    #[error("invalid matching mode in {path}: {source}")]
    InvalidMatchingMode {
        /// Path to the offending file.
        path: PathBuf,
        /// Why the value was rejected.
        source: UnitError,
    },

    /// Failed to render the effective configuration.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] ser::Error),

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
