// Aggregate outcome of one rule-set evaluation

use crate::{ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Outcome of validating one value against a [`RuleSet`](crate::RuleSet).
///
/// `value` is the normalized value, also on failure, so callers can store
/// exactly what was checked. It is empty only for non-string input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub reasons: Vec<String>,
    pub value: String,
}

impl ValidationResult {
    pub(crate) fn from_reasons(value: String, reasons: Vec<String>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
            value,
        }
    }

    pub(crate) fn accepted(value: String) -> Self {
        Self {
            ok: true,
            reasons: Vec::new(),
            value,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn has_reason(&self, reason: &str) -> bool {
        self.reasons.iter().any(|r| r == reason)
    }

    /// Normalized value on success, one [`ValidationError`] per reason otherwise.
    pub fn into_result(self, field: &str) -> Result<String, ValidationErrors> {
        if self.ok {
            return Ok(self.value);
        }
        let value = self.value;
        Err(self
            .reasons
            .iter()
            .map(|reason| ValidationError::from_reason(field, reason).with_value(value.clone()))
            .collect::<Vec<_>>()
            .into())
    }
}
