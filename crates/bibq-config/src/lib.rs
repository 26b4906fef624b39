//! Configuration system for bibq.
//!
//! bibq uses TOML configuration files named `.bibq.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.bibq.toml` files
//! found, then loading `~/.bibq.toml` as the global config with lowest precedence.
//!
//! The merged [`Config`] holds the search defaults and a [`FieldTable`], which tells the
//! compiler which fields are logical and which are physical tags.

#![warn(missing_docs)]

mod discovery;
mod error;
mod fields;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use bibq_query::{MatchingMode, SearchUnit, compile};
pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use fields::FieldTable;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{RawConfig, RawSearchSettings, RawTagSettings, parse_config_file, parse_config_str};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Search defaults.
    pub search: SearchSettings,
    /// Logical fields and tags.
    pub fields: FieldTable,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.bibq.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Compiles a pattern against this configuration.
    ///
    /// `field` and `mode` override the configured defaults when given.
    pub fn compile(
        &self,
        pattern: &str,
        field: Option<&str>,
        mode: Option<MatchingMode>,
    ) -> Vec<SearchUnit> {
        let field = field.unwrap_or(&self.search.default_field);
        let mode = mode.unwrap_or(self.search.matching);
        compile(pattern, field, Some(mode), &self.fields)
    }

    /// Serializes the effective configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableConfig {
            search: self.search.clone(),
            fields: self
                .fields
                .fields()
                .map(|(name, tags)| (name.to_string(), tags.to_vec()))
                .collect(),
            tags: SerializableTags {
                extra: self.fields.extra_tags().map(String::from).collect(),
            },
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Search defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Field applied when a pattern has no inline prefix; empty means none.
    pub default_field: String,
    /// How patterns are interpreted.
    pub matching: MatchingMode,
}

/// TOML shape of the effective configuration.
#[derive(Serialize)]
struct SerializableConfig {
    /// Search defaults.
    search: SearchSettings,
    /// Logical fields, sorted by name.
    fields: BTreeMap<String, Vec<String>>,
    /// Tag settings.
    tags: SerializableTags,
}

/// TOML shape of the `[tags]` section.
#[derive(Serialize)]
struct SerializableTags {
    /// Extra tag codes, sorted.
    extra: Vec<String>,
}
