//! Escape configuration.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Entities applied when no override is configured.
pub const DEFAULT_ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
];

/// Which characters get escaped and how.
///
/// Deserializes from JSON or TOML with every field optional:
///
/// ```toml
/// extra = ["/", "`"]
/// exclude = ["'"]
/// prevent_double_escape = true
///
/// [map]
/// "/" = "&#x2F;"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// Characters escaped in addition to the defaults.
    pub extra: BTreeSet<char>,

    /// Characters never escaped, even if listed in the defaults or `extra`.
    pub exclude: BTreeSet<char>,

    /// Entity overrides and additions; wins over [`DEFAULT_ENTITIES`].
    pub map: BTreeMap<char, String>,

    /// Pass existing entity references like `&amp;` or `&#x2F;` through untouched.
    pub prevent_double_escape: bool,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            extra: BTreeSet::new(),
            exclude: BTreeSet::new(),
            map: BTreeMap::new(),
            prevent_double_escape: true,
        }
    }
}

impl EscapeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Escape `ch` as well. Without a matching [`with_entity`](Self::with_entity)
    /// entry the character is substituted by itself.
    pub fn with_extra(mut self, ch: char) -> Self {
        self.extra.insert(ch);
        self
    }

    /// Never escape `ch`.
    pub fn without(mut self, ch: char) -> Self {
        self.exclude.insert(ch);
        self
    }

    /// Map `ch` to `entity`, replacing any default.
    pub fn with_entity(mut self, ch: char, entity: impl Into<String>) -> Self {
        self.map.insert(ch, entity.into());
        self
    }

    pub fn prevent_double_escape(mut self, enabled: bool) -> Self {
        self.prevent_double_escape = enabled;
        self
    }

    /// Default entities merged with the overrides.
    pub fn merged_entities(&self) -> BTreeMap<char, String> {
        let mut merged: BTreeMap<char, String> = DEFAULT_ENTITIES
            .iter()
            .map(|(ch, entity)| (*ch, (*entity).to_string()))
            .collect();
        merged.extend(self.map.iter().map(|(ch, entity)| (*ch, entity.clone())));
        merged
    }

    /// `(merged entity keys ∪ extra) − exclude`
    pub fn escape_set(&self) -> BTreeSet<char> {
        self.merged_entities()
            .into_keys()
            .chain(self.extra.iter().copied())
            .filter(|ch| !self.exclude.contains(ch))
            .collect()
    }
}
