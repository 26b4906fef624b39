//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use bibq_query::{FieldKind, FieldResolver, is_tag_code};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A logical field name cannot be written as an inline `name:` prefix.
    FieldNotPrefixable {
        /// Name of the field.
        field: String,
    },
    /// A logical field name is shaped like a tag and shadows it.
    FieldLooksLikeTag {
        /// Name of the field.
        field: String,
    },
    /// A tag listed for a field is neither tag-shaped nor declared in `[tags].extra`.
    TagNotTagShaped {
        /// Name of the field.
        field: String,
        /// The suspicious tag.
        tag: String,
    },
    /// A logical field maps to no tags.
    EmptyFieldMapping {
        /// Name of the field.
        field: String,
    },
    /// `search.default_field` resolves to neither a logical field nor a tag.
    UnknownDefaultField {
        /// The configured default field.
        field: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotPrefixable { field } => {
                write!(f, "field '{field}' cannot be used as an inline prefix")
            }
            Self::FieldLooksLikeTag { field } => {
                write!(f, "field '{field}' looks like a tag and shadows it")
            }
            Self::TagNotTagShaped { field, tag } => {
                write!(
                    f,
                    "tag '{tag}' of field '{field}' is not tag-shaped; add it to [tags].extra"
                )
            }
            Self::EmptyFieldMapping { field } => {
                write!(f, "field '{field}' maps to no tags")
            }
            Self::UnknownDefaultField { field } => {
                write!(f, "default field '{field}' is neither a field nor a tag")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - Field names that can't be written as prefixes or look like tags
/// - Field tag lists that are empty or hold codes that don't look like tags
/// - A default field the resolver doesn't know
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let extra: Vec<&str> = config.fields.extra_tags().collect();

    for (field, tags) in config.fields.fields() {
        if !is_prefixable(field) {
            warnings.push(ConfigWarning::FieldNotPrefixable {
                field: field.to_string(),
            });
        }
        if is_tag_code(field) {
            warnings.push(ConfigWarning::FieldLooksLikeTag {
                field: field.to_string(),
            });
        }
        if tags.is_empty() {
            warnings.push(ConfigWarning::EmptyFieldMapping {
                field: field.to_string(),
            });
        }
        for tag in tags {
            if !is_tag_code(tag) && !extra.contains(&tag.as_str()) {
                warnings.push(ConfigWarning::TagNotTagShaped {
                    field: field.to_string(),
                    tag: tag.clone(),
                });
            }
        }
    }

    let default_field = &config.search.default_field;
    if !default_field.is_empty() && config.fields.resolve(default_field) == FieldKind::Unknown {
        warnings.push(ConfigWarning::UnknownDefaultField {
            field: default_field.clone(),
        });
    }

    warnings
}

/// Checks whether a name survives the inline prefix scanner.
fn is_prefixable(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
