// Environment variable overrides

use crate::loader::merge;
use serde_json::{Map, Value};
use std::env;

/// Prefix for every variable the board reads.
pub const DEFAULT_PREFIX: &str = "CORKBOARD";

/// Separates nesting levels in a variable name.
pub const SEPARATOR: &str = "__";

/// One variable mapped onto a config path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvOverride {
    pub path: Vec<String>,
    pub value: String,
}

/// Environment variable loader
///
/// `CORKBOARD_PASSWORD__MIN_LENGTH=12` becomes the path
/// `["password", "min_length"]`. Variables without a [`SEPARATOR`] (such as
/// the logging switches `CORKBOARD_LOG_LEVEL`) are not config keys and are
/// skipped.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Overrides from the process environment
    pub fn load(&self) -> Vec<EnvOverride> {
        self.collect(env::vars())
    }

    /// Overrides from an explicit set of variables, sorted by path
    pub fn collect<I, K, V>(&self, vars: I) -> Vec<EnvOverride>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let head = format!("{}_", self.prefix);

        let mut overrides: Vec<EnvOverride> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let rest = key.as_ref().strip_prefix(&head)?;
                if !rest.contains(SEPARATOR) {
                    return None;
                }

                let path: Vec<String> = rest.split(SEPARATOR).map(str::to_lowercase).collect();
                if path.iter().any(String::is_empty) {
                    return None;
                }

                Some(EnvOverride {
                    path,
                    value: value.into(),
                })
            })
            .collect();

        overrides.sort_by(|a, b| a.path.cmp(&b.path));
        overrides
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Write overrides into a config tree.
///
/// Where the current value is a string the raw text is kept as a string, so
/// `CORKBOARD_TRUNCATE__ELLIPSIS=123` stays text. Otherwise the text is
/// read as JSON (`12`, `true`, `["a","b"]`) and falls back to a string.
pub fn apply_overrides(target: &mut Value, overrides: &[EnvOverride]) {
    for EnvOverride { path, value } in overrides {
        let pointer: String = path
            .iter()
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect();

        let mut parsed = match target.pointer(&pointer) {
            Some(Value::String(_)) => Value::String(value.clone()),
            _ => serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.clone())),
        };
        for segment in path.iter().rev() {
            let mut table = Map::new();
            table.insert(segment.clone(), parsed);
            parsed = Value::Object(table);
        }

        merge(target, parsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collect_maps_paths() {
        let loader = EnvLoader::default();
        let overrides = loader.collect([
            ("CORKBOARD_PASSWORD__MIN_LENGTH", "12"),
            ("CORKBOARD_LOG_LEVEL", "debug"),
            ("CORKBOARD_ESCAPE__PREVENT_DOUBLE_ESCAPE", "false"),
            ("OTHER_APP__KEY", "x"),
            ("CORKBOARD_BROKEN____KEY", "x"),
        ]);

        assert_eq!(
            overrides,
            vec![
                EnvOverride {
                    path: vec!["escape".into(), "prevent_double_escape".into()],
                    value: "false".into(),
                },
                EnvOverride {
                    path: vec!["password".into(), "min_length".into()],
                    value: "12".into(),
                },
            ]
        );
    }

    #[test]
    fn test_custom_prefix() {
        let loader = EnvLoader::new("BOARD");
        let overrides = loader.collect([("BOARD_TRUNCATE__MAX_LENGTH", "60")]);
        assert_eq!(overrides[0].path, vec!["truncate", "max_length"]);
    }

    #[test]
    fn test_apply_typed_values() {
        let mut config = json!({
            "password": {"min_length": 8},
            "truncate": {"ellipsis": "...", "word_safe": false}
        });
        let overrides = EnvLoader::default().collect([
            ("CORKBOARD_PASSWORD__MIN_LENGTH", "12"),
            ("CORKBOARD_TRUNCATE__ELLIPSIS", "123"),
            ("CORKBOARD_TRUNCATE__WORD_SAFE", "true"),
            ("CORKBOARD_USERNAME__BLACKLIST", r#"["staff","team"]"#),
            ("CORKBOARD_USERNAME__ALLOWED", "[a-z]+"),
        ]);
        apply_overrides(&mut config, &overrides);

        assert_eq!(config["password"]["min_length"], 12);
        assert_eq!(config["truncate"]["ellipsis"], "123");
        assert_eq!(config["truncate"]["word_safe"], true);
        assert_eq!(config["username"]["blacklist"], json!(["staff", "team"]));
        assert_eq!(config["username"]["allowed"], "[a-z]+");
    }

    #[test]
    fn test_apply_replaces_scalar_parent() {
        let mut config = json!({"escape": 5});
        apply_overrides(
            &mut config,
            &[EnvOverride {
                path: vec!["escape".into(), "extra".into()],
                value: r#"["/"]"#.into(),
            }],
        );
        assert_eq!(config, json!({"escape": {"extra": ["/"]}}));
    }
}
