// Multi-field validation (registration and profile forms)

use crate::reason;
use crate::{RuleSet, ValidationError, ValidationErrors};
use corkboard_log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Rule sets keyed by form field.
///
/// Every field is checked and all reasons are collected. A missing field is
/// reported with the `required` constraint.
///
/// ```rust
/// use corkboard_validation::{FormRules, RuleSet};
/// use std::collections::HashMap;
///
/// let form = FormRules::new()
///     .field("username", RuleSet::username())
///     .field("email", RuleSet::email());
///
/// let mut data = HashMap::new();
/// data.insert("username".to_string(), "Alice".to_string());
/// data.insert("email".to_string(), "alice@example.com".to_string());
///
/// let clean = form.validate(&data).unwrap();
/// assert_eq!(clean["username"], "alice");
/// ```
#[derive(Clone, Default)]
pub struct FormRules {
    fields: Vec<(String, Arc<RuleSet>)>,
}

/// Normalized field values keyed by field name.
pub type CleanForm = HashMap<String, String>;

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field
    pub fn field(mut self, name: impl Into<String>, rules: RuleSet) -> Self {
        self.fields.push((name.into(), Arc::new(rules)));
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Validate all fields, returning their normalized values.
    pub fn validate(&self, data: &HashMap<String, String>) -> Result<CleanForm, ValidationErrors> {
        let mut clean = CleanForm::new();
        let mut errors = ValidationErrors::default();

        for (name, rules) in &self.fields {
            match check_field(name, rules, data.get(name)) {
                Ok(value) => {
                    clean.insert(name.clone(), value);
                }
                Err(mut field_errors) => errors.errors.append(&mut field_errors),
            }
        }

        finish(clean, errors)
    }

    /// Validate all fields concurrently on the tokio runtime.
    ///
    /// Errors are grouped per field in declaration order, matching
    /// [`validate`](Self::validate).
    pub async fn validate_parallel(
        &self,
        data: &HashMap<String, String>,
    ) -> Result<CleanForm, ValidationErrors> {
        use tokio::task::JoinSet;

        let mut set = JoinSet::new();

        for (index, (name, rules)) in self.fields.iter().enumerate() {
            let name = name.clone();
            let rules = Arc::clone(rules);
            let value = data.get(&name).cloned();

            set.spawn(async move {
                let outcome = check_field(&name, &rules, value.as_ref());
                (index, name, outcome)
            });
        }

        let mut outcomes = Vec::with_capacity(self.fields.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    return Err(vec![ValidationError::new(
                        "unknown",
                        format!("Validation task failed: {}", e),
                    )
                    .with_constraint("task_error")]
                    .into());
                }
            }
        }
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut clean = CleanForm::new();
        let mut errors = ValidationErrors::default();
        for (_, name, outcome) in outcomes {
            match outcome {
                Ok(value) => {
                    clean.insert(name, value);
                }
                Err(mut field_errors) => errors.errors.append(&mut field_errors),
            }
        }

        finish(clean, errors)
    }
}

fn check_field(
    name: &str,
    rules: &RuleSet,
    value: Option<&String>,
) -> Result<String, Vec<ValidationError>> {
    let Some(value) = value else {
        return Err(vec![
            ValidationError::new(name, format!("{} is required", name)).with_constraint("required"),
        ]);
    };

    rules
        .validate(value)
        .into_result(name)
        .map_err(|errors| errors.errors)
}

fn finish(clean: CleanForm, errors: ValidationErrors) -> Result<CleanForm, ValidationErrors> {
    if errors.is_empty() {
        Ok(clean)
    } else {
        debug!(
            target: "corkboard::validation",
            "form rejected with {} error(s)",
            errors.len()
        );
        Err(errors)
    }
}
