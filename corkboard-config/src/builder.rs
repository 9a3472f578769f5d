// Layered configuration loading

use crate::board::BoardConfig;
use crate::env::{EnvLoader, apply_overrides};
use crate::loader::{ConfigLoader, merge};
use crate::validation::Validate;
use crate::{ConfigError, Result};
use corkboard_log::{debug, info};
use std::path::PathBuf;

/// Builds a [`BoardConfig`] from defaults, files, `.env` and the
/// environment, later layers winning.
///
/// ```no_run
/// use corkboard_config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .add_file("board.toml")
///     .load_dotenv(None)
///     .load_env()
///     .build()?;
/// # Ok::<(), corkboard_config::ConfigError>(())
/// ```
pub struct ConfigBuilder {
    files: Vec<PathBuf>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    env_loader: EnvLoader,
    vars: Vec<(String, String)>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            env_loader: EnvLoader::default(),
            vars: Vec::new(),
        }
    }

    /// Set environment variable prefix (default `CORKBOARD`)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_loader = EnvLoader::new(prefix);
        self
    }

    /// Add a JSON or TOML file, format taken from its extension
    pub fn add_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Enable loading a `.env` file into the environment first.
    ///
    /// With `None` a missing `.env` in the working directory is ignored; an
    /// explicit path must exist.
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Apply variables as if they came from the environment.
    ///
    /// Names are matched against the prefix in effect when [`build`](Self::build)
    /// runs.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Load, merge, deserialize and validate
    pub fn build(self) -> Result<BoardConfig> {
        let mut tree = serde_json::to_value(BoardConfig::default())
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        for path in &self.files {
            let loader = ConfigLoader::auto(path)?;
            debug!(target: "corkboard::config", "loading {}", path.display());
            merge(&mut tree, loader.load_file(path)?);
        }

        if self.load_dotenv {
            match &self.dotenv_path {
                Some(path) => {
                    dotenvy::from_path(path).map_err(|e| {
                        ConfigError::LoadError(format!("{}: {}", path.display(), e))
                    })?;
                }
                None => {
                    dotenvy::dotenv().ok();
                }
            }
        }

        if self.load_env {
            let overrides = self.env_loader.load();
            debug!(target: "corkboard::config", "{} environment override(s)", overrides.len());
            apply_overrides(&mut tree, &overrides);
        }
        apply_overrides(&mut tree, &self.env_loader.collect(self.vars.iter().cloned()));

        let config: BoardConfig = serde_json::from_value(tree)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        config.validate()?;

        info!(target: "corkboard::config", "configuration loaded from {} file(s)", self.files.len());
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
