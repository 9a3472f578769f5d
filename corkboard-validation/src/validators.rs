// Built-in validators: email addresses and password strength

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// RFC 5322 flavoured: dot-atom local part, hostname labels, at least one dot
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)+$").unwrap()
});

/// Check an email address. Surrounding whitespace is ignored.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// [`validate_email`] for loosely typed input; non-strings are invalid.
pub fn validate_email_value(email: &Value) -> bool {
    email.as_str().is_some_and(validate_email)
}

/// Length bounds outside of which a password is always rated weak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    Invalid,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLabel::Invalid => "invalid",
            StrengthLabel::Weak => "weak",
            StrengthLabel::Fair => "fair",
            StrengthLabel::Good => "good",
            StrengthLabel::Strong => "strong",
            StrengthLabel::VeryStrong => "very_strong",
        }
    }

    fn from_score(score: u8) -> Self {
        match score {
            0 => StrengthLabel::Weak,
            1 => StrengthLabel::Fair,
            2 => StrengthLabel::Good,
            3 => StrengthLabel::Strong,
            _ => StrengthLabel::VeryStrong,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// 0 to 4
    pub score: u8,
    pub label: StrengthLabel,
}

const MAX_SCORE: u8 = 4;

/// Score a password from its character classes and length.
///
/// One point each for lowercase, uppercase, digits and symbols, one more at
/// 12 characters and another at 16, capped at 4.
pub fn password_strength(password: &str, rules: &PasswordRules) -> PasswordStrength {
    let length = password.chars().count();

    let classes = [
        password.chars().any(char::is_lowercase),
        password.chars().any(char::is_uppercase),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    let bonuses = [length >= 12, length >= 16];

    let points = classes.iter().chain(bonuses.iter()).filter(|hit| **hit).count();
    let score = u8::try_from(points).unwrap_or(MAX_SCORE).min(MAX_SCORE);

    let label = if length < rules.min_length || length > rules.max_length {
        StrengthLabel::Weak
    } else {
        StrengthLabel::from_score(score)
    };

    PasswordStrength { score, label }
}

/// [`password_strength`] for loosely typed input; non-strings are `invalid`.
pub fn password_strength_value(password: &Value, rules: &PasswordRules) -> PasswordStrength {
    match password.as_str() {
        Some(password) => password_strength(password, rules),
        None => PasswordStrength {
            score: 0,
            label: StrengthLabel::Invalid,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_emails() {
        for email in [
            "user@example.com",
            "test.user@domain.co.uk",
            "  padded@example.org ",
            "UPPER@EXAMPLE.COM",
            "o'reilly+tag@mail-host.io",
        ] {
            assert!(validate_email(email), "{email}");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "invalid-email",
            "@example.com",
            "user@",
            "user@localhost",
            "user@-example.com",
            "user name@example.com",
            "user@example..com",
        ] {
            assert!(!validate_email(email), "{email}");
        }
    }

    #[test]
    fn test_email_value() {
        assert!(validate_email_value(&json!("a@b.co")));
        assert!(!validate_email_value(&json!(1)));
        assert!(!validate_email_value(&Value::Null));
    }

    #[test]
    fn test_password_scores() {
        let rules = PasswordRules::default();
        let cases = [
            ("abcdefgh", 1, StrengthLabel::Fair),
            ("abcdEFGH", 2, StrengthLabel::Good),
            ("abcdEF12", 3, StrengthLabel::Strong),
            ("abcdEF1!", 4, StrengthLabel::VeryStrong),
            ("abcdefghijkl", 2, StrengthLabel::Good),
            ("abcdefghijklmnop", 3, StrengthLabel::Strong),
            ("Abcdefghijklmnop1!", 4, StrengthLabel::VeryStrong),
        ];
        for (password, score, label) in cases {
            let strength = password_strength(password, &rules);
            assert_eq!(strength.score, score, "{password}");
            assert_eq!(strength.label, label, "{password}");
        }
    }

    #[test]
    fn test_out_of_bounds_is_weak() {
        let rules = PasswordRules::default();
        let short = password_strength("aB1!", &rules);
        assert_eq!(short.score, 4);
        assert_eq!(short.label, StrengthLabel::Weak);

        let rules = PasswordRules {
            min_length: 1,
            max_length: 10,
        };
        assert_eq!(password_strength("aB1!aB1!aB1!", &rules).label, StrengthLabel::Weak);
        assert_eq!(password_strength("", &rules).label, StrengthLabel::Weak);
    }

    #[test]
    fn test_non_string_password() {
        let strength = password_strength_value(&json!(12345678), &PasswordRules::default());
        assert_eq!(strength.label, StrengthLabel::Invalid);
        assert_eq!(strength.label.to_string(), "invalid");
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_value(StrengthLabel::VeryStrong).unwrap(), json!("very_strong"));
    }
}
