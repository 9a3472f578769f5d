// Rule sets: declarative validation of a single string value

use crate::errors::RuleError;
use crate::reason;
use crate::result::ValidationResult;
use corkboard_log::{debug, trace, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Error a custom check may return; it is reported as
/// [`reason::CUSTOM_VALIDATOR_ERROR`], never propagated.
pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

type CustomFn = Arc<dyn Fn(&str) -> Result<Option<String>, CheckError> + Send + Sync>;
type NormalizeFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Built-in normalization steps, usable from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalize {
    Trim,
    Lowercase,
    Uppercase,
    CollapseWhitespace,
}

impl Normalize {
    pub fn apply(self, value: &str) -> String {
        match self {
            Normalize::Trim => value.trim().to_string(),
            Normalize::Lowercase => value.to_lowercase(),
            Normalize::Uppercase => value.to_uppercase(),
            Normalize::CollapseWhitespace => value.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

/// A compiled set of rules for one kind of value (username, display name, tag...).
///
/// Every rule runs and every violation is reported, in this order: length,
/// allowed characters, start/end, `disallow` patterns, consecutive
/// characters, blacklist, custom checks. A whitelisted value skips all of
/// them.
///
/// ```rust
/// use corkboard_validation::RuleSet;
///
/// let rules = RuleSet::builder()
///     .length(3, 12)
///     .allowed(r"^[A-Za-z0-9_-]+$")
///     .disallow("(?i)admin")
///     .build()
///     .unwrap();
///
/// let result = rules.validate("johndoe");
/// assert!(result.ok);
/// assert_eq!(result.value, "johndoe");
///
/// let result = rules.validate("Admin-user");
/// assert_eq!(result.reasons, vec!["disallowed:(?i)admin"]);
/// ```
#[derive(Clone, Default)]
pub struct RuleSet {
    min: Option<usize>,
    max: Option<usize>,
    allowed: Option<Regex>,
    starts_with: Option<Regex>,
    ends_with: Option<Regex>,
    disallow: Vec<Regex>,
    no_consecutive: Vec<(char, Regex)>,
    blacklist: HashSet<String>,
    whitelist: HashSet<String>,
    normalize: Option<NormalizeFn>,
    custom: Vec<CustomFn>,
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("allowed", &self.allowed.as_ref().map(Regex::as_str))
            .field("starts_with", &self.starts_with.as_ref().map(Regex::as_str))
            .field("ends_with", &self.ends_with.as_ref().map(Regex::as_str))
            .field("disallow", &self.disallow.iter().map(Regex::as_str).collect::<Vec<_>>())
            .field("no_consecutive", &self.no_consecutive.iter().map(|(ch, _)| ch).collect::<Vec<_>>())
            .field("blacklist", &self.blacklist.len())
            .field("whitelist", &self.whitelist.len())
            .field("normalize", &self.normalize.is_some())
            .field("custom", &self.custom.len())
            .finish()
    }
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Evaluate every rule against `value`.
    pub fn validate(&self, value: &str) -> ValidationResult {
        let value = match &self.normalize {
            Some(normalize) => normalize(value),
            None => value.to_string(),
        };

        if self.whitelist.contains(&value) {
            trace!(target: "corkboard::validation", "{:?} is whitelisted", value);
            return ValidationResult::accepted(value);
        }

        let mut reasons = Vec::new();

        let length = value.chars().count();
        if self.min.is_some_and(|min| length < min) {
            reasons.push(reason::TOO_SHORT.to_string());
        }
        if self.max.is_some_and(|max| length > max) {
            reasons.push(reason::TOO_LONG.to_string());
        }

        if self.allowed.as_ref().is_some_and(|re| !re.is_match(&value)) {
            reasons.push(reason::INVALID_CHARS.to_string());
        }
        if self.starts_with.as_ref().is_some_and(|re| !re.is_match(&value)) {
            reasons.push(reason::BAD_START.to_string());
        }
        if self.ends_with.as_ref().is_some_and(|re| !re.is_match(&value)) {
            reasons.push(reason::BAD_END.to_string());
        }

        reasons.extend(
            self.disallow
                .iter()
                .filter(|re| re.is_match(&value))
                .map(|re| reason::disallowed(re.as_str())),
        );

        reasons.extend(
            self.no_consecutive
                .iter()
                .filter(|(_, re)| re.is_match(&value))
                .map(|(ch, _)| reason::consecutive(*ch)),
        );

        if self.blacklist.contains(&value) {
            reasons.push(reason::BLACKLISTED.to_string());
        }

        for check in &self.custom {
            match panic::catch_unwind(AssertUnwindSafe(|| check(value.as_str()))) {
                Ok(Ok(Some(custom))) if !custom.is_empty() => reasons.push(custom),
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    warn!(target: "corkboard::validation", "custom check failed: {}", e);
                    reasons.push(reason::CUSTOM_VALIDATOR_ERROR.to_string());
                }
                Err(_) => {
                    warn!(target: "corkboard::validation", "custom check panicked");
                    reasons.push(reason::CUSTOM_VALIDATOR_ERROR.to_string());
                }
            }
        }

        if !reasons.is_empty() {
            debug!(
                target: "corkboard::validation",
                "rejected {:?}: {}",
                value,
                reasons.join(", ")
            );
        }

        ValidationResult::from_reasons(value, reasons)
    }

    /// Validate loosely typed input; non-strings fail with `not_a_string`.
    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        match value {
            Value::String(text) => self.validate(text),
            _ => ValidationResult::from_reasons(String::new(), vec![reason::NOT_A_STRING.to_string()]),
        }
    }

    /// Bind this rule set into a single-argument validator.
    pub fn validator(self) -> impl Fn(&str) -> ValidationResult + Send + Sync + Clone {
        let rules = Arc::new(self);
        move |value: &str| rules.validate(value)
    }
}

/// Collects rules and compiles their patterns in [`build`](Self::build).
#[derive(Default)]
pub struct RuleSetBuilder {
    min: Option<usize>,
    max: Option<usize>,
    allowed: Option<String>,
    starts_with: Option<String>,
    ends_with: Option<String>,
    disallow: Vec<String>,
    no_consecutive: Vec<char>,
    blacklist: HashSet<String>,
    whitelist: HashSet<String>,
    normalize: Option<NormalizeFn>,
    custom: Vec<CustomFn>,
}

impl RuleSetBuilder {
    /// Minimum length in characters.
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Maximum length in characters.
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Both bounds. `min > max` is accepted and makes both checks fire.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.min(min).max(max)
    }

    /// The whole value must match `pattern`.
    pub fn allowed(mut self, pattern: impl Into<String>) -> Self {
        self.allowed = Some(pattern.into());
        self
    }

    /// The value must begin with a match of `pattern`.
    pub fn starts_with(mut self, pattern: impl Into<String>) -> Self {
        self.starts_with = Some(pattern.into());
        self
    }

    /// The value must end with a match of `pattern`.
    pub fn ends_with(mut self, pattern: impl Into<String>) -> Self {
        self.ends_with = Some(pattern.into());
        self
    }

    /// Reject values containing a match of `pattern`. Repeatable.
    pub fn disallow(mut self, pattern: impl Into<String>) -> Self {
        self.disallow.push(pattern.into());
        self
    }

    /// Reject values repeating `ch` two or more times in a row.
    pub fn no_consecutive(mut self, ch: char) -> Self {
        if !self.no_consecutive.contains(&ch) {
            self.no_consecutive.push(ch);
        }
        self
    }

    pub fn blacklist<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist.extend(values.into_iter().map(Into::into));
        self
    }

    /// Values accepted without running any other rule.
    pub fn whitelist<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(values.into_iter().map(Into::into));
        self
    }

    /// Transform applied once before any rule; its output is what gets
    /// checked and returned.
    pub fn normalize<F>(mut self, normalize: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalize = Some(Arc::new(normalize));
        self
    }

    /// Chain built-in normalization steps, applied in order.
    pub fn normalize_with<I>(self, steps: I) -> Self
    where
        I: IntoIterator<Item = Normalize>,
    {
        let steps: Vec<Normalize> = steps.into_iter().collect();
        if steps.is_empty() {
            return self;
        }
        self.normalize(move |value| {
            steps
                .iter()
                .fold(value.to_string(), |acc, step| step.apply(&acc))
        })
    }

    /// Check returning `Some(reason)` on failure.
    pub fn custom<F>(self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.try_custom(move |value| Ok(check(value)))
    }

    /// Fallible check; an `Err` is reported as `custom_validator_error`.
    pub fn try_custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Result<Option<String>, CheckError> + Send + Sync + 'static,
    {
        self.custom.push(Arc::new(check));
        self
    }

    pub fn build(self) -> Result<RuleSet, RuleError> {
        let allowed = self
            .allowed
            .map(|src| compile("allowed", &format!("^(?:{})$", src), src))
            .transpose()?;
        let starts_with = self
            .starts_with
            .map(|src| compile("starts_with", &format!("^(?:{})", src), src))
            .transpose()?;
        let ends_with = self
            .ends_with
            .map(|src| compile("ends_with", &format!("(?:{})$", src), src))
            .transpose()?;

        let disallow = self
            .disallow
            .into_iter()
            .map(|src| compile("disallow", &src.clone(), src))
            .collect::<Result<Vec<_>, _>>()?;

        // caller-supplied characters are matched literally
        let no_consecutive = self
            .no_consecutive
            .into_iter()
            .map(|ch| {
                let source = format!("(?:{}){{2,}}", regex::escape(ch.encode_utf8(&mut [0; 4])));
                compile("no_consecutive", &source, source.clone()).map(|re| (ch, re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet {
            min: self.min,
            max: self.max,
            allowed,
            starts_with,
            ends_with,
            disallow,
            no_consecutive,
            blacklist: self.blacklist,
            whitelist: self.whitelist,
            normalize: self.normalize,
            custom: self.custom,
        })
    }
}

fn compile(rule: &'static str, source: &str, pattern: String) -> Result<Regex, RuleError> {
    Regex::new(source).map_err(|source| RuleError::InvalidPattern {
        rule,
        pattern,
        source,
    })
}

/// Serializable form of a [`RuleSet`] for configuration files.
///
/// Custom checks cannot be expressed here; add them to the builder returned
/// by [`RuleSpec::builder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub allowed: Option<String>,
    pub starts_with: Option<String>,
    pub ends_with: Option<String>,
    pub disallow: Vec<String>,
    pub no_consecutive: Vec<char>,
    pub blacklist: Vec<String>,
    pub whitelist: Vec<String>,
    pub normalize: Vec<Normalize>,
}

impl RuleSpec {
    pub fn builder(&self) -> RuleSetBuilder {
        let mut builder = RuleSet::builder()
            .blacklist(self.blacklist.iter().cloned())
            .whitelist(self.whitelist.iter().cloned())
            .normalize_with(self.normalize.iter().copied());
        builder.min = self.min;
        builder.max = self.max;
        builder.allowed = self.allowed.clone();
        builder.starts_with = self.starts_with.clone();
        builder.ends_with = self.ends_with.clone();
        builder.disallow = self.disallow.clone();
        for ch in &self.no_consecutive {
            builder = builder.no_consecutive(*ch);
        }
        builder
    }

    pub fn compile(&self) -> Result<RuleSet, RuleError> {
        self.builder().build()
    }
}

impl TryFrom<RuleSpec> for RuleSet {
    type Error = RuleError;

    fn try_from(spec: RuleSpec) -> Result<Self, Self::Error> {
        spec.compile()
    }
}

/// Validate `value` against `rules`.
pub fn validate(value: &str, rules: &RuleSet) -> ValidationResult {
    rules.validate(value)
}

/// Validate loosely typed input against `rules`.
pub fn validate_value(value: &Value, rules: &RuleSet) -> ValidationResult {
    rules.validate_value(value)
}

/// Bind `rules` into a reusable single-argument validator.
pub fn make_validator(rules: RuleSet) -> impl Fn(&str) -> ValidationResult + Send + Sync + Clone {
    rules.validator()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn username_rules() -> RuleSet {
        RuleSet::builder()
            .length(3, 12)
            .allowed(r"^[A-Za-z0-9_-]+$")
            .build()
            .unwrap()
    }

    #[test]
    fn test_valid_username() {
        let result = validate("johndoe", &username_rules());
        assert_eq!(
            result,
            ValidationResult {
                ok: true,
                reasons: vec![],
                value: "johndoe".to_string()
            }
        );
    }

    #[test]
    fn test_disallow_tags_pattern_source() {
        let rules = RuleSet::builder().disallow("(?i)admin").build().unwrap();
        let result = rules.validate("admin-user");
        assert!(!result.ok);
        assert!(result.reasons.iter().any(|r| r.contains("admin")));
        assert_eq!(result.reasons, vec!["disallowed:(?i)admin"]);
    }

    #[test]
    fn test_length_bounds() {
        let rules = username_rules();
        assert_eq!(rules.validate("jo").reasons, vec![reason::TOO_SHORT]);
        assert_eq!(rules.validate("abcdefghijklm").reasons, vec![reason::TOO_LONG]);
        assert!(rules.validate("abc").ok);
        assert!(rules.validate("abcdefghijkl").ok);
    }

    #[test]
    fn test_length_counts_characters() {
        let rules = RuleSet::builder().max(3).build().unwrap();
        assert!(rules.validate("äöü").ok);
    }

    #[test]
    fn test_min_greater_than_max_fires_both() {
        let rules = RuleSet::builder().length(10, 2).build().unwrap();
        assert_eq!(
            rules.validate("hello").reasons,
            vec![reason::TOO_SHORT, reason::TOO_LONG]
        );
    }

    #[test]
    fn test_allowed_is_whole_string() {
        let rules = RuleSet::builder().allowed("[a-z]+").build().unwrap();
        assert!(rules.validate("abc").ok);
        assert_eq!(rules.validate("abc1").reasons, vec![reason::INVALID_CHARS]);
    }

    #[test]
    fn test_allowed_alternation_must_cover_whole_value() {
        let rules = RuleSet::builder().allowed("a|ab").build().unwrap();
        assert!(rules.validate("ab").ok);
    }

    #[test]
    fn test_start_and_end() {
        let rules = RuleSet::builder()
            .starts_with("[A-Za-z]")
            .ends_with("[A-Za-z0-9]")
            .build()
            .unwrap();
        assert!(rules.validate("a-1").ok);
        assert_eq!(rules.validate("1ab").reasons, vec![reason::BAD_START]);
        assert_eq!(rules.validate("ab-").reasons, vec![reason::BAD_END]);
        assert_eq!(
            rules.validate("_x_").reasons,
            vec![reason::BAD_START, reason::BAD_END]
        );
    }

    #[test]
    fn test_multiple_disallow_in_rule_order() {
        let rules = RuleSet::builder()
            .disallow("mod")
            .disallow("(?i)admin")
            .disallow("root")
            .build()
            .unwrap();
        assert_eq!(
            rules.validate("ADMIN_mod").reasons,
            vec!["disallowed:mod", "disallowed:(?i)admin"]
        );
    }

    #[test]
    fn test_no_consecutive_escapes_metacharacters() {
        let rules = RuleSet::builder()
            .no_consecutive('.')
            .no_consecutive('*')
            .no_consecutive('-')
            .build()
            .unwrap();
        assert!(rules.validate("a.b*c-d").ok);
        assert!(rules.validate("ab").ok);
        assert_eq!(rules.validate("a..b").reasons, vec!["consecutive:."]);
        assert_eq!(
            rules.validate("a--b**").reasons,
            vec!["consecutive:*", "consecutive:-"]
        );
    }

    #[test]
    fn test_blacklist() {
        let rules = RuleSet::builder().blacklist(["root", "sysop"]).build().unwrap();
        assert_eq!(rules.validate("root").reasons, vec![reason::BLACKLISTED]);
        assert!(rules.validate("rooted").ok);
    }

    #[test]
    fn test_whitelist_dominates_everything() {
        let rules = RuleSet::builder()
            .length(10, 20)
            .allowed("[0-9]+")
            .disallow("admin")
            .no_consecutive('d')
            .blacklist(["admin"])
            .whitelist(["admin"])
            .custom(|_| Some("never".to_string()))
            .build()
            .unwrap();
        let result = rules.validate("admin");
        assert!(result.ok);
        assert!(result.reasons.is_empty());
        assert_eq!(result.value, "admin");
    }

    #[test]
    fn test_reason_order() {
        let rules = RuleSet::builder()
            .try_custom(|_| Ok(Some("custom_reason".to_string())))
            .blacklist(["__admin__"])
            .no_consecutive('_')
            .disallow("admin")
            .ends_with("[a-z]")
            .starts_with("[a-z]")
            .allowed("[a-z]+")
            .min(10)
            .build()
            .unwrap();

        assert_eq!(
            rules.validate("__admin__").reasons,
            vec![
                reason::TOO_SHORT,
                reason::INVALID_CHARS,
                reason::BAD_START,
                reason::BAD_END,
                "disallowed:admin",
                "consecutive:_",
                reason::BLACKLISTED,
                "custom_reason",
            ]
        );
    }

    #[test]
    fn test_normalize_runs_first_and_is_returned() {
        let rules = RuleSet::builder()
            .normalize_with([Normalize::Trim, Normalize::Lowercase])
            .blacklist(["admin"])
            .build()
            .unwrap();

        let result = rules.validate("  Admin ");
        assert_eq!(result.value, "admin");
        assert_eq!(result.reasons, vec![reason::BLACKLISTED]);

        let result = rules.validate(" Alice");
        assert!(result.ok);
        assert_eq!(result.value, "alice");
    }

    #[test]
    fn test_custom_checks_in_order() {
        let rules = RuleSet::builder()
            .custom(|v| v.contains('x').then(|| "has_x".to_string()))
            .custom(|_| Some(String::new()))
            .custom(|v| v.contains('y').then(|| "has_y".to_string()))
            .build()
            .unwrap();
        assert_eq!(rules.validate("xy").reasons, vec!["has_x", "has_y"]);
        assert!(rules.validate("ab").ok);
    }

    #[test]
    fn test_custom_error_becomes_reason() {
        let rules = RuleSet::builder()
            .try_custom(|_| Err("lookup failed".into()))
            .custom(|_| Some("after".to_string()))
            .build()
            .unwrap();
        assert_eq!(
            rules.validate("bob").reasons,
            vec![reason::CUSTOM_VALIDATOR_ERROR, "after"]
        );
    }

    #[test]
    fn test_custom_panic_becomes_reason() {
        let rules = RuleSet::builder()
            .custom(|_| panic!("boom"))
            .build()
            .unwrap();
        assert_eq!(
            rules.validate("bob").reasons,
            vec![reason::CUSTOM_VALIDATOR_ERROR]
        );
    }

    #[test]
    fn test_not_a_string() {
        let rules = username_rules();
        for value in [json!(42), json!(null), json!(["johndoe"]), json!({"name": "x"})] {
            let result = validate_value(&value, &rules);
            assert!(!result.ok);
            assert_eq!(result.reasons, vec![reason::NOT_A_STRING]);
            assert_eq!(result.value, "");
        }
        assert!(validate_value(&json!("johndoe"), &rules).ok);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = RuleSet::builder().allowed("[a-z").build().unwrap_err();
        match err {
            RuleError::InvalidPattern { rule, pattern, .. } => {
                assert_eq!(rule, "allowed");
                assert_eq!(pattern, "[a-z");
            }
        }
    }

    #[test]
    fn test_make_validator() {
        let check = make_validator(username_rules());
        let again = check.clone();
        assert!(check("alice").ok);
        assert!(!again("a").ok);
    }

    #[test]
    fn test_rule_spec_compiles() {
        let spec: RuleSpec = serde_json::from_value(json!({
            "min": 3,
            "max": 12,
            "allowed": "^[a-z0-9_]+$",
            "disallow": ["(?i)admin"],
            "no_consecutive": ["_"],
            "blacklist": ["root"],
            "normalize": ["trim", "lowercase"]
        }))
        .unwrap();
        let rules = RuleSet::try_from(spec).unwrap();

        assert!(rules.validate(" Alice ").ok);
        assert_eq!(rules.validate("ROOT").reasons, vec![reason::BLACKLISTED]);
        assert_eq!(rules.validate("a__b").reasons, vec!["consecutive:_"]);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(Normalize::CollapseWhitespace.apply("  a \t b\n c "), "a b c");
        assert_eq!(Normalize::Uppercase.apply("abc"), "ABC");
    }
}
