//! Length-limited previews of post bodies and titles.

use crate::encoder::json_kind;
use corkboard_log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How [`truncate`] shortens text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncateOptions {
    /// Cut at the last space before the limit instead of mid-word.
    pub word_safe: bool,

    /// Appended to truncated text.
    pub ellipsis: String,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            word_safe: false,
            ellipsis: "...".to_string(),
        }
    }
}

impl TruncateOptions {
    pub fn word_safe() -> Self {
        Self {
            word_safe: true,
            ..Self::default()
        }
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }
}

/// Shorten `text` to `max_length` characters.
///
/// Text that already fits is returned unchanged. Otherwise the first
/// `max_length - 1` characters are kept (one position is reserved for the
/// ellipsis mark), optionally cut back to the last space, stripped of
/// trailing whitespace and suffixed with the ellipsis. A `max_length` of zero
/// yields an empty string.
///
/// ```rust
/// use corkboard_text::{truncate, TruncateOptions};
///
/// let text = "Hello world, this is a test.";
/// assert_eq!(truncate(text, 10, &TruncateOptions::default()), "Hello wor...");
/// assert_eq!(truncate(text, 10, &TruncateOptions::word_safe()), "Hello...");
/// ```
pub fn truncate(text: &str, max_length: usize, options: &TruncateOptions) -> String {
    if max_length == 0 {
        return String::new();
    }
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let end = text
        .char_indices()
        .nth(max_length - 1)
        .map_or(text.len(), |(idx, _)| idx);
    let mut cut = &text[..end];

    if options.word_safe {
        if let Some(space) = cut.rfind(' ').filter(|&idx| idx > 0) {
            cut = &cut[..space];
        }
    }

    let mut out = String::with_capacity(cut.len() + options.ellipsis.len());
    out.push_str(cut.trim_end());
    out.push_str(&options.ellipsis);
    out
}

/// [`truncate`] for loosely typed input: non-strings and non-positive
/// lengths yield `""`.
pub fn truncate_value(text: &Value, max_length: i64, options: &TruncateOptions) -> String {
    let Value::String(text) = text else {
        warn!(target: "corkboard::text", "refusing to truncate non-string input: {}", json_kind(text));
        return String::new();
    };
    match usize::try_from(max_length) {
        Ok(max_length) => truncate(text, max_length, options),
        Err(_) => String::new(),
    }
}
