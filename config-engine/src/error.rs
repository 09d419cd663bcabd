use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration source not found: {0}")]
    SourceNotFound(String),

    #[error("Configuration parsing failed: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration override {key}: {message}")]
    OverrideError { key: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigError::SourceNotFound(key),
            config::ConfigError::Foreign(e) if e.to_string().contains("not found") => {
                ConfigError::SourceNotFound(e.to_string())
            }
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
