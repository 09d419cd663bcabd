use aip_identity::AipValidator;
use error_common::{AgentCtlError, Result};
use logger_redacted::{InputRedactor, RedactionConfig};
use schema_registry::{SchemaKind, SchemaRegistry};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tracing::info;

use crate::settings::Settings;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub aip: Arc<AipValidator>,
    pub schemas: Arc<SchemaRegistry>,
    pub redactor: Arc<InputRedactor>,
    pub started_at: Instant,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(settings: Settings, aip: AipValidator, schemas: SchemaRegistry) -> Self {
        let redaction = if settings.logging.redact_inputs {
            RedactionConfig::default()
        } else {
            RedactionConfig::disabled()
        };

        Self {
            settings: Arc::new(settings),
            aip: Arc::new(aip),
            schemas: Arc::new(schemas),
            redactor: Arc::new(InputRedactor::new(redaction)),
            started_at: Instant::now(),
        }
    }

    /// Build the AIP policy and load every configured schema.
    ///
    /// # Errors
    ///
    /// Fails on an invalid AIP policy or a schema file that cannot be read
    /// or compiled.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let policy = settings
            .aip
            .policy()
            .map_err(|e| AgentCtlError::ConfigError(format!("Invalid aip policy: {e}")))?;
        info!(
            max_lifetime_minutes = policy.max_lifetime_minutes,
            required = ?policy.required_extensions,
            "AIP policy configured"
        );

        let mut schemas = SchemaRegistry::new();
        let configured: [(SchemaKind, &Option<PathBuf>); 3] = [
            (SchemaKind::Adp, &settings.schemas.adp),
            (SchemaKind::Pvs, &settings.schemas.pvs),
            (SchemaKind::Manifest, &settings.schemas.manifest),
        ];
        for (kind, path) in configured {
            if let Some(path) = path {
                schemas
                    .load_file(kind, path)
                    .map_err(|e| AgentCtlError::SchemaError(e.to_string()))?;
            }
        }

        Ok(Self::new(settings, AipValidator::new(policy), schemas))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
