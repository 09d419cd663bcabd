use config::{Config, Environment, File};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Builds a typed configuration from defaults, a file, the environment and
/// explicit overrides.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
    file: Option<(PathBuf, bool)>,
    list_keys: Vec<String>,
    overrides: Vec<(String, config::Value)>,
}

impl ConfigLoader {
    pub fn new(env_prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: env_prefix.into(),
            file: None,
            list_keys: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Load `path`; a missing file is an error.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some((path.into(), true));
        self
    }

    /// Load `path` if it exists.
    pub fn with_optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some((path.into(), false));
        self
    }

    /// Parse this key as a comma separated list when it comes from the
    /// environment.
    pub fn with_list_key(mut self, key: impl Into<String>) -> Self {
        self.list_keys.push(key.into());
        self
    }

    pub fn set_override(mut self, key: impl Into<String>, value: impl Into<config::Value>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Resolve every layer into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required file is missing, a source does
    /// not parse, or the merged values do not fit `T`.
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let defaults = Config::try_from(&T::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some((path, required)) = &self.file {
            if *required && !path.exists() {
                return Err(ConfigError::SourceNotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), required = *required, "Adding configuration file");
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }

        let mut env = Environment::with_prefix(&self.env_prefix)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);
        if !self.list_keys.is_empty() {
            env = env.list_separator(",");
            for key in &self.list_keys {
                env = env.with_list_parse_key(key);
            }
        }
        builder = builder.add_source(env);

        for (key, value) in &self.overrides {
            builder = builder
                .set_override(key.as_str(), value.clone())
                .map_err(|e| ConfigError::OverrideError {
                    key: key.clone(),
                    message: e.to_string(),
                })?;
        }

        let config = builder.build()?;
        config
            .try_deserialize::<T>()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
