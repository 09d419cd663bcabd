use aip_identity::{AipOid, AipPolicy, PolicyError, DEFAULT_MAX_LIFETIME_MINUTES};
use config_engine::{ConfigError, ConfigLoader};
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix, e.g. `AGENTCTL__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "AGENTCTL";

/// Read when present and no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "agentctl.yaml";

/// Server configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub aip: AipSettings,
    pub schemas: SchemaSettings,
    pub logging: LoggerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind address
    pub host: String,
    pub port: u16,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_bytes: 64 * 1024,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AipSettings {
    pub max_lifetime_minutes: u32,
    /// Registry names, checked in this order
    pub required_extensions: Vec<String>,
}

impl Default for AipSettings {
    fn default() -> Self {
        Self {
            max_lifetime_minutes: DEFAULT_MAX_LIFETIME_MINUTES,
            required_extensions: AipOid::REQUIRED.iter().map(|oid| oid.key().to_string()).collect(),
        }
    }
}

impl AipSettings {
    /// # Errors
    ///
    /// Returns [`PolicyError`] for unknown extension names or a zero cap.
    pub fn policy(&self) -> Result<AipPolicy, PolicyError> {
        AipPolicy::from_names(self.max_lifetime_minutes, &self.required_extensions)
    }
}

/// Paths to schema documents. Unset kinds answer 503.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    pub adp: Option<PathBuf>,
    pub pvs: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

/// Command-line values that take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl Settings {
    /// Resolve defaults, the config file, `AGENTCTL__*` variables and
    /// `overrides`, in that order. An explicit `config_path` must exist;
    /// without one, [`DEFAULT_CONFIG_FILE`] is read if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config_path` is missing or a source does
    /// not parse.
    pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new(ENV_PREFIX)
            .with_list_key("aip.required_extensions")
            .with_list_key("server.cors_origins");

        loader = match config_path {
            Some(path) => loader.with_file(path),
            None => loader.with_optional_file(DEFAULT_CONFIG_FILE),
        };
        if let Some(host) = &overrides.host {
            loader = loader.set_override("server.host", host.clone());
        }
        if let Some(port) = overrides.port {
            loader = loader.set_override("server.port", i64::from(port));
        }
        if let Some(level) = &overrides.log_level {
            loader = loader.set_override("logging.level", level.clone());
        }

        loader.load()
    }
}
