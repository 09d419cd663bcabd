use thiserror::Error;

/// Service-level failures outside the validation verdicts
#[derive(Error, Debug)]
pub enum AgentCtlError {
    /// Network communication errors
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    ServerError(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Schema document could not be loaded or compiled
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Internal system errors
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AgentCtlError {
    /// Stable code for this error, see [`crate::codes`].
    pub fn code(&self) -> &'static str {
        match self {
            AgentCtlError::NetworkError(_) => crate::codes::service::NETWORK,
            AgentCtlError::ServerError(_) => crate::codes::service::SERVER,
            AgentCtlError::ConfigError(_) => crate::codes::service::CONFIGURATION,
            AgentCtlError::SchemaError(_) => crate::codes::service::SCHEMA_NOT_LOADED,
            AgentCtlError::InternalError(_) | AgentCtlError::Other(_) => crate::codes::service::INTERNAL,
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, AgentCtlError>;

/// Log a service error with its code
pub fn log_error(context: &str, error: &AgentCtlError) {
    tracing::error!(
        context = context,
        code = error.code(),
        error = %error,
        "Service error occurred"
    );
}
