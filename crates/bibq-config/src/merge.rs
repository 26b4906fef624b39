//! Configuration merging.
//!
//! Merges several parsed `.bibq.toml` files into one `Config`.

use std::path::PathBuf;

use bibq_query::MatchingMode;

use crate::{
    Config, ConfigError, FieldTable, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files into a single `Config`.
///
/// Configs are given highest precedence first (closest to the working directory).
///
/// Merge rules:
/// - Search settings: first defined value wins
/// - Fields: merged by name, first definition wins completely
/// - Extra tags: union of all files
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(closest) = configs.first() else {
        return Ok(Config::default());
    };

    let mut search = SearchSettings::default();
    let mut fields = FieldTable::new();

    // Lowest precedence first so that closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.search {
            apply_raw_search(&mut search, raw, parsed)?;
        }
        for (name, tags) in &parsed.config.fields {
            fields.insert(name, tags.clone());
        }
        let extra = parsed.config.tags.as_ref().and_then(|t| t.extra.as_ref());
        for code in extra.into_iter().flatten() {
            fields.add_extra_tag(code.clone());
        }
    }

    Ok(Config {
        search,
        fields,
        config_root: closest.path.parent().map(PathBuf::from),
    })
}

/// Applies raw search settings, overwriting any present values.
fn apply_raw_search(
    result: &mut SearchSettings,
    raw: &RawSearchSettings,
    parsed: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(field) = &raw.default_field {
        result.default_field = field.clone();
    }
    if let Some(matching) = &raw.matching {
        result.matching = matching.parse::<MatchingMode>().map_err(|source| {
            ConfigError::InvalidMatchingMode {
                path: parsed.path.clone(),
                source,
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use bibq_query::{FieldKind, FieldResolver};

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn empty_list_gives_defaults() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config.search.default_field, "");
        assert_eq!(config.search.matching, MatchingMode::All);
        assert!(config.config_root.is_none());
    }

    #[test]
    fn closest_settings_win() {
        let config = merge_configs(&[
            parsed("/p/.bibq.toml", "[search]\ndefault_field = \"title\"\n"),
            parsed(
                "/home/.bibq.toml",
                "[search]\ndefault_field = \"abstract\"\nmatching = \"any\"\n",
            ),
        ])
        .unwrap();
        assert_eq!(config.search.default_field, "title");
        assert_eq!(config.search.matching, MatchingMode::Any);
        assert_eq!(config.config_root, Some(PathBuf::from("/p")));
    }

    #[test]
    fn fields_merge_by_name() {
        let config = merge_configs(&[
            parsed("/p/.bibq.toml", "[fields]\ntitle = \"245__a\"\n"),
            parsed(
                "/home/.bibq.toml",
                "[fields]\ntitle = [\"245__a\", \"246__a\"]\nauthor = \"100__a\"\n",
            ),
        ])
        .unwrap();
        assert_eq!(
            config.fields.tags_for("title").unwrap(),
            &["245__a".to_string()]
        );
        assert_eq!(config.fields.resolve("author"), FieldKind::Logical);
    }

    #[test]
    fn extra_tags_union() {
        let config = merge_configs(&[
            parsed("/p/.bibq.toml", "[tags]\nextra = [\"FFT\"]\n"),
            parsed("/home/.bibq.toml", "[tags]\nextra = [\"BDR\"]\n"),
        ])
        .unwrap();
        let extra: Vec<_> = config.fields.extra_tags().collect();
        assert_eq!(extra, vec!["BDR", "FFT"]);
    }

    #[test]
    fn bad_matching_mode_names_file() {
        let err = merge_configs(&[parsed(
            "/p/.bibq.toml",
            "[search]\nmatching = \"fuzzy\"\n",
        )])
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("/p/.bibq.toml"));
        assert!(message.contains("fuzzy"));
    }
}
