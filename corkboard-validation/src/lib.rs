//! Validation for Corkboard
//!
//! Declarative rule sets for single string values (usernames, display
//! names, tags), evaluated in one pass that reports every violated rule, plus
//! email and password-strength checks and multi-field form validation.
//!
//! # Examples
//!
//! ## Rule sets
//!
//! ```
//! use corkboard_validation::{validate, RuleSet};
//!
//! let rules = RuleSet::builder()
//!     .length(3, 12)
//!     .allowed(r"^[A-Za-z0-9_-]+$")
//!     .no_consecutive('_')
//!     .blacklist(["root"])
//!     .build()
//!     .unwrap();
//!
//! assert!(validate("johndoe", &rules).ok);
//!
//! let result = validate("x__", &rules);
//! assert_eq!(result.reasons, vec!["consecutive:_"]);
//! ```
//!
//! ## Whitelist override
//!
//! ```
//! use corkboard_validation::RuleSet;
//!
//! // the board owner keeps their reserved name
//! let rules = RuleSet::builder()
//!     .blacklist(["admin"])
//!     .whitelist(["admin"])
//!     .build()
//!     .unwrap();
//! assert!(rules.validate("admin").ok);
//! ```
//!
//! ## Email and password
//!
//! ```
//! use corkboard_validation::{password_strength, validate_email, PasswordRules, StrengthLabel};
//!
//! assert!(validate_email(" user@example.com "));
//! assert!(!validate_email("user@"));
//!
//! let strength = password_strength("correct-Horse-7", &PasswordRules::default());
//! assert_eq!(strength.label, StrengthLabel::VeryStrong);
//! ```

mod errors;
mod form;
mod presets;
pub mod reason;
mod result;
mod rules;
mod validators;

pub use errors::*;
pub use form::*;
pub use presets::RESERVED_USERNAMES;
pub use result::*;
pub use rules::*;
pub use validators::*;
