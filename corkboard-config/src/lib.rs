// Configuration loading for Corkboard

pub mod board;
pub mod builder;
pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use board::{BoardConfig, TruncateSettings};
pub use builder::ConfigBuilder;
pub use env::{DEFAULT_PREFIX, EnvLoader, EnvOverride, apply_overrides};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat, merge};
pub use validation::Validate;

use std::path::Path;

/// Load a single config file layered over the defaults, then the process
/// environment.
pub fn load(path: impl AsRef<Path>) -> Result<BoardConfig> {
    ConfigBuilder::new()
        .add_file(path.as_ref())
        .load_env()
        .build()
}

/// Parse a config document held in memory, layered over the defaults.
pub fn from_str(content: &str, format: FileFormat) -> Result<BoardConfig> {
    let mut tree = serde_json::to_value(BoardConfig::default())
        .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
    merge(&mut tree, ConfigLoader::new(format).parse(content)?);

    let config: BoardConfig = serde_json::from_value(tree)
        .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
