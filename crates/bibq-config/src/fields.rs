//! Field tables.
//!
//! A field table lists the logical fields a deployment offers and the physical tags each one
//! covers. It is the configured implementation of [`FieldResolver`].

use std::collections::{BTreeMap, BTreeSet};

use bibq_query::{FieldKind, FieldResolver, is_tag_code};

/// Logical fields and the tags behind them.
///
/// Field names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    /// Lowercased logical field name -> physical tags.
    logical: BTreeMap<String, Vec<String>>,
    /// Codes that are tags although not tag-shaped.
    extra_tags: BTreeSet<String>,
}

impl FieldTable {
    /// Creates an empty table. Only tag-shaped codes resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a logical field.
    pub fn insert(&mut self, name: &str, tags: Vec<String>) {
        self.logical.insert(name.to_ascii_lowercase(), tags);
    }

    /// Builder form of [`FieldTable::insert`].
    pub fn with_field(mut self, name: &str, tags: &[&str]) -> Self {
        self.insert(name, tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Declares a code a physical tag.
    pub fn add_extra_tag(&mut self, code: impl Into<String>) {
        self.extra_tags.insert(code.into());
    }

    /// Returns the tags behind a logical field.
    pub fn tags_for(&self, field: &str) -> Option<&[String]> {
        self.logical
            .get(&field.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Iterates over logical fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.logical
            .iter()
            .map(|(name, tags)| (name.as_str(), tags.as_slice()))
    }

    /// Iterates over the extra tag codes.
    pub fn extra_tags(&self) -> impl Iterator<Item = &str> {
        self.extra_tags.iter().map(String::as_str)
    }

    /// Returns true if no logical fields or extra tags are defined.
    pub fn is_empty(&self) -> bool {
        self.logical.is_empty() && self.extra_tags.is_empty()
    }

    /// Checks whether `code` is a tag by shape, by declaration, or by use in a field.
    fn is_tag(&self, code: &str) -> bool {
        is_tag_code(code)
            || self.extra_tags.contains(code)
            || self
                .logical
                .values()
                .any(|tags| tags.iter().any(|t| t == code))
    }
}

impl FieldResolver for FieldTable {
    fn resolve(&self, field: &str) -> FieldKind {
        if field.is_empty() {
            FieldKind::Unknown
        } else if self.logical.contains_key(&field.to_ascii_lowercase()) {
            FieldKind::Logical
        } else if self.is_tag(field) {
            FieldKind::Tag
        } else {
            FieldKind::Unknown
        }
    }
}
