// Ready-made rule sets for common board fields

use crate::rules::{Normalize, RuleSet, RuleSpec};
use crate::validators::validate_email;
use once_cell::sync::Lazy;

/// Names nobody may register, regardless of other rules.
pub const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "administrator",
    "anonymous",
    "guest",
    "mod",
    "moderator",
    "null",
    "root",
    "support",
    "sysop",
    "system",
];

static USERNAME: Lazy<RuleSet> = Lazy::new(|| {
    RuleSpec::username()
        .compile()
        .expect("username preset compiles")
});

static EMAIL: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::builder()
        .normalize_with([Normalize::Trim, Normalize::Lowercase])
        .max(254)
        .custom(|value| (!validate_email(value)).then(|| "invalid_email".to_string()))
        .build()
        .expect("email preset compiles")
});

impl RuleSpec {
    /// The username preset in serializable form, for layering config on top.
    pub fn username() -> RuleSpec {
        RuleSpec {
            min: Some(3),
            max: Some(20),
            allowed: Some(r"[a-z0-9_-]+".to_string()),
            starts_with: Some(r"[a-z0-9]".to_string()),
            ends_with: Some(r"[a-z0-9]".to_string()),
            no_consecutive: vec!['-', '_'],
            blacklist: RESERVED_USERNAMES.iter().map(|s| s.to_string()).collect(),
            normalize: vec![Normalize::Trim, Normalize::Lowercase],
            ..RuleSpec::default()
        }
    }
}

impl RuleSet {
    /// Case-insensitive usernames: 3 to 20 of `a-z 0-9 _ -`, starting and
    /// ending alphanumeric, no doubled separators, reserved names refused.
    pub fn username() -> RuleSet {
        USERNAME.clone()
    }

    /// Lowercased email address, reason `invalid_email` when malformed.
    pub fn email() -> RuleSet {
        EMAIL.clone()
    }
}
