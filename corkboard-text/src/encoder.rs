//! HTML entity escaping.

use crate::config::EscapeConfig;
use crate::error::{Result, TextError};
use corkboard_log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;

/// An existing entity reference: `&` then decimal digits (with or without
/// `#`), `#x`/`#X` plus hex digits, or a letter plus alphanumerics, then `;`.
static ENTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#?[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]+);")
        .expect("entity pattern is valid")
});

static DEFAULT_ESCAPER: Lazy<Escaper> = Lazy::new(|| {
    Escaper::new(EscapeConfig::default()).expect("default escape set compiles")
});

/// A compiled [`EscapeConfig`].
///
/// Construction merges the entity maps, computes the effective escape set and
/// compiles it into a single character class. `escape` is then a pure function
/// of its input and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Escaper {
    entities: BTreeMap<char, String>,
    /// `None` when the effective escape set is empty.
    targets: Option<Regex>,
    prevent_double_escape: bool,
}

impl Escaper {
    pub fn new(config: EscapeConfig) -> Result<Self> {
        let set = config.escape_set();
        let targets = if set.is_empty() {
            debug!(target: "corkboard::text", "escape set is empty; escaper is the identity");
            None
        } else {
            let class: String = set
                .iter()
                .map(|ch| regex::escape(ch.encode_utf8(&mut [0; 4])))
                .collect();
            let source = format!("[{}]", class);
            let regex = Regex::new(&source)
                .map_err(|e| TextError::PatternCompilation(source.clone(), e))?;
            debug!(target: "corkboard::text", "compiled escape class {}", source);
            Some(regex)
        };

        Ok(Self {
            entities: config.merged_entities(),
            targets,
            prevent_double_escape: config.prevent_double_escape,
        })
    }

    /// Escaper for the five default entities with double-escape prevention.
    pub fn html() -> &'static Escaper {
        &DEFAULT_ESCAPER
    }

    /// Whether this escaper leaves every input unchanged.
    pub fn is_identity(&self) -> bool {
        self.targets.is_none()
    }

    pub fn escape(&self, input: &str) -> String {
        let Some(targets) = &self.targets else {
            return input.to_string();
        };

        if !self.prevent_double_escape {
            return self.substitute(targets, input);
        }

        let mut out = String::with_capacity(input.len() + input.len() / 4);
        let mut last = 0;
        for entity in ENTITY_PATTERN.find_iter(input) {
            out.push_str(&self.substitute(targets, &input[last..entity.start()]));
            out.push_str(entity.as_str());
            last = entity.end();
        }
        out.push_str(&self.substitute(targets, &input[last..]));
        out
    }

    /// Escape a JSON value; anything other than a string yields `""`.
    pub fn escape_value(&self, input: &Value) -> String {
        match input {
            Value::String(text) => self.escape(text),
            other => {
                warn!(target: "corkboard::text", "refusing to escape non-string input: {}", json_kind(other));
                String::new()
            }
        }
    }

    fn substitute(&self, targets: &Regex, text: &str) -> String {
        targets
            .replace_all(text, |caps: &Captures<'_>| {
                let matched = &caps[0];
                matched
                    .chars()
                    .next()
                    .and_then(|ch| self.entities.get(&ch))
                    .cloned()
                    .unwrap_or_else(|| matched.to_string())
            })
            .into_owned()
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Escape `input` with a one-off configuration.
///
/// ```rust
/// use corkboard_text::{escape, EscapeConfig};
///
/// let html = escape(r#"<b>"Hello"&</b>"#, &EscapeConfig::default());
/// assert_eq!(html, "&lt;b&gt;&quot;Hello&quot;&amp;&lt;/b&gt;");
/// ```
pub fn escape(input: &str, config: &EscapeConfig) -> String {
    match Escaper::new(config.clone()) {
        Ok(escaper) => escaper.escape(input),
        Err(e) => {
            error!(target: "corkboard::text", "{}", e);
            String::new()
        }
    }
}

/// Like [`escape`] but accepts any JSON value.
pub fn escape_value(input: &Value, config: &EscapeConfig) -> String {
    match Escaper::new(config.clone()) {
        Ok(escaper) => escaper.escape_value(input),
        Err(e) => {
            error!(target: "corkboard::text", "{}", e);
            String::new()
        }
    }
}

/// Escape with the default configuration.
pub fn escape_html(input: &str) -> String {
    Escaper::html().escape(input)
}

/// Bind `config` once and return a reusable single-argument escaper.
pub fn make_escaper(config: EscapeConfig) -> Result<impl Fn(&str) -> String + Send + Sync + Clone> {
    let escaper = Escaper::new(config)?;
    Ok(move |input: &str| escaper.escape(input))
}

/// Decode the default named entities and every numeric reference.
///
/// Unknown named entities and invalid code points are left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[0];
            decode_one(entity).unwrap_or_else(|| entity.to_string())
        })
        .into_owned()
}

fn decode_one(entity: &str) -> Option<String> {
    let body = &entity[1..entity.len() - 1];
    let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = body.strip_prefix('#') {
        dec.parse().ok()
    } else if body.starts_with(|c: char| c.is_ascii_digit()) {
        body.parse().ok()
    } else {
        return match body {
            "amp" => Some("&".to_string()),
            "lt" => Some("<".to_string()),
            "gt" => Some(">".to_string()),
            "quot" => Some("\"".to_string()),
            "apos" => Some("'".to_string()),
            _ => None,
        };
    };
    code.and_then(char::from_u32).map(String::from)
}
