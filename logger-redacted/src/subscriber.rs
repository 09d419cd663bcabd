use thiserror::Error;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggerConfig};

/// Dependency targets added to every default filter.
pub const DEFAULT_FILTER_TARGETS: &[&str] = &["tower_http=info", "hyper=info"];

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Invalid log filter \"{filter}\": {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// Filter used when `RUST_LOG` is not set, e.g.
/// `agentctl_server=info,aip_identity=info,tower_http=info,hyper=info`.
pub fn default_filter(config: &LoggerConfig, crates: &[&str]) -> String {
    crates
        .iter()
        .map(|krate| format!("{krate}={}", config.level))
        .chain(DEFAULT_FILTER_TARGETS.iter().map(|t| (*t).to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
///
/// # Errors
///
/// Returns [`LoggerError`] if the filter does not parse or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggerConfig, crates: &[&str]) -> Result<(), LoggerError> {
    let directives = default_filter(config, crates);
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&directives).map_err(|e| LoggerError::InvalidFilter {
            filter: directives.clone(),
            message: e.to_string(),
        })?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(true)
                    .with_level(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}
