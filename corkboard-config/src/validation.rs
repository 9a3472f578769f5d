// Configuration validation

use crate::Result;

/// Trait for validating configuration after it has been deserialized
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
