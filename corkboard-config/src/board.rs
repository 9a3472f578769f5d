// Board-wide settings for the text and validation helpers

use crate::validation::Validate;
use crate::{ConfigError, Result};
use corkboard_text::{EscapeConfig, Escaper, TruncateOptions, truncate};
use corkboard_validation::{PasswordRules, PasswordStrength, RuleSet, RuleSpec, password_strength};
use serde::{Deserialize, Serialize};

/// Everything a board configures about user-supplied text.
///
/// ```toml
/// [escape]
/// extra = ["/"]
///
/// [username]
/// max = 16
/// whitelist = ["admin"]
///
/// [password]
/// min_length = 10
///
/// [truncate]
/// max_length = 120
/// word_safe = true
/// ```
///
/// Missing sections and keys keep their defaults; `[username]` starts from
/// [`RuleSpec::username`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub escape: EscapeConfig,
    pub username: RuleSpec,
    pub password: PasswordRules,
    pub truncate: TruncateSettings,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            escape: EscapeConfig::default(),
            username: RuleSpec::username(),
            password: PasswordRules::default(),
            truncate: TruncateSettings::default(),
        }
    }
}

/// Preview length plus how to cut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncateSettings {
    pub max_length: usize,
    #[serde(flatten)]
    pub options: TruncateOptions,
}

impl Default for TruncateSettings {
    fn default() -> Self {
        Self {
            max_length: 200,
            options: TruncateOptions::default(),
        }
    }
}

impl BoardConfig {
    /// Build the configured escaper.
    pub fn escaper(&self) -> Result<Escaper> {
        Escaper::new(self.escape.clone())
            .map_err(|e| ConfigError::ValidationError(format!("escape: {}", e)))
    }

    /// Compile the configured username rules.
    pub fn username_rules(&self) -> Result<RuleSet> {
        self.username
            .compile()
            .map_err(|e| ConfigError::ValidationError(format!("username: {}", e)))
    }

    /// Shorten `text` to the configured preview length.
    pub fn preview(&self, text: &str) -> String {
        truncate(text, self.truncate.max_length, &self.truncate.options)
    }

    /// Rate a password against the configured length bounds.
    pub fn password_strength(&self, password: &str) -> PasswordStrength {
        password_strength(password, &self.password)
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<()> {
        if self.password.min_length > self.password.max_length {
            return Err(ConfigError::ValidationError(format!(
                "password: min_length {} is greater than max_length {}",
                self.password.min_length, self.password.max_length
            )));
        }

        self.escaper()?;
        self.username_rules()?;
        Ok(())
    }
}
