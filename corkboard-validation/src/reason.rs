//! Machine readable failure reasons produced by [`RuleSet`](crate::RuleSet).

pub const NOT_A_STRING: &str = "not_a_string";
pub const TOO_SHORT: &str = "too_short";
pub const TOO_LONG: &str = "too_long";
pub const INVALID_CHARS: &str = "invalid_chars";
pub const BAD_START: &str = "bad_start";
pub const BAD_END: &str = "bad_end";
pub const BLACKLISTED: &str = "blacklisted";
pub const CUSTOM_VALIDATOR_ERROR: &str = "custom_validator_error";

const DISALLOWED_PREFIX: &str = "disallowed:";
const CONSECUTIVE_PREFIX: &str = "consecutive:";

/// Reason for a matching `disallow` pattern, tagged with its source text.
pub fn disallowed(pattern: &str) -> String {
    format!("{}{}", DISALLOWED_PREFIX, pattern)
}

/// Reason for a character repeated two or more times in a row.
pub fn consecutive(ch: char) -> String {
    format!("{}{}", CONSECUTIVE_PREFIX, ch)
}

/// Human readable message for a reason.
pub fn describe(field: &str, reason: &str) -> String {
    if let Some(pattern) = reason.strip_prefix(DISALLOWED_PREFIX) {
        return format!("{} matches the forbidden pattern {}", field, pattern);
    }
    if let Some(ch) = reason.strip_prefix(CONSECUTIVE_PREFIX) {
        return format!("{} repeats '{}' consecutively", field, ch);
    }
    match reason {
        NOT_A_STRING => format!("{} must be a string", field),
        TOO_SHORT => format!("{} is too short", field),
        TOO_LONG => format!("{} is too long", field),
        INVALID_CHARS => format!("{} contains invalid characters", field),
        BAD_START => format!("{} starts with an invalid character", field),
        BAD_END => format!("{} ends with an invalid character", field),
        BLACKLISTED => format!("{} is not available", field),
        CUSTOM_VALIDATOR_ERROR => format!("{} could not be checked", field),
        other => format!("{} is invalid: {}", field, other),
    }
}
