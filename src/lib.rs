// Corkboard - building blocks for bulletin-board applications
//
// HTML escaping with double-escape prevention, rule-driven input validation,
// preview truncation, and the key-value storage contract boards persist
// through.

// Re-export the always-on helpers
pub use corkboard_text::{
    DEFAULT_ENTITIES, EscapeConfig, Escaper, TextError, TruncateOptions, decode_entities, escape,
    escape_html, escape_value, make_escaper, truncate, truncate_value,
};
pub use corkboard_validation::{
    CleanForm, FormRules, Normalize, PasswordRules, PasswordStrength, RESERVED_USERNAMES,
    RuleError, RuleSet, RuleSetBuilder, RuleSpec, StrengthLabel, ValidationError,
    ValidationErrors, ValidationResult, make_validator, password_strength,
    password_strength_value, reason, validate, validate_email, validate_email_value,
    validate_value,
};

// Re-export member crates
pub use corkboard_log as log;
pub use corkboard_text as text;
pub use corkboard_validation as validation;

#[cfg(feature = "store")]
pub use corkboard_store as store;

#[cfg(feature = "config")]
pub use corkboard_config as config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        EscapeConfig, Escaper, FormRules, PasswordRules, RuleSet, RuleSpec, StrengthLabel,
        TruncateOptions, ValidationResult, escape, escape_html, make_escaper, make_validator,
        password_strength, truncate, validate, validate_email,
    };

    #[cfg(feature = "store")]
    pub use corkboard_store::{MemoryStore, NamespacedStore, StorageAdapter, StoreError, TypedStore};

    #[cfg(feature = "config")]
    pub use corkboard_config::{BoardConfig, ConfigBuilder, ConfigError};
}
