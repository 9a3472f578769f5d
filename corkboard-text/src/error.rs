use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to compile escape pattern '{0}': {1}")]
    PatternCompilation(String, #[source] regex::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;
