use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::error::{Result, SchemaError};
use crate::validator::{SchemaReport, SchemaValidator};

/// Record formats validated by schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Adp,
    Pvs,
    Manifest,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 3] = [SchemaKind::Adp, SchemaKind::Pvs, SchemaKind::Manifest];

    pub fn display_name(&self) -> &'static str {
        match self {
            SchemaKind::Adp => "ADP-1",
            SchemaKind::Pvs => "PVS-1",
            SchemaKind::Manifest => "agent-manifest",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One compiled validator per schema kind.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    validators: HashMap<SchemaKind, SchemaValidator>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `schema` and register it for `kind`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if compilation fails.
    pub fn insert(&mut self, kind: SchemaKind, schema: &Value) -> Result<()> {
        let validator = SchemaValidator::compile(schema)?;
        self.validators.insert(kind, validator);
        Ok(())
    }

    /// Read a JSON schema document from disk and register it for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an I/O, JSON or schema compilation error.
    pub fn load_file(&mut self, kind: SchemaKind, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema: Value = serde_json::from_str(&raw).map_err(|source| SchemaError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        self.insert(kind, &schema)?;
        info!(schema = %kind, path = %path.display(), "Schema loaded");
        Ok(())
    }

    pub fn is_loaded(&self, kind: SchemaKind) -> bool {
        self.validators.contains_key(&kind)
    }

    pub fn loaded(&self) -> Vec<SchemaKind> {
        SchemaKind::ALL
            .into_iter()
            .filter(|kind| self.is_loaded(*kind))
            .collect()
    }

    /// Validate `instance` against the schema registered for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotLoaded`] when no schema is registered.
    pub fn validate(&self, kind: SchemaKind, instance: &Value) -> Result<SchemaReport> {
        self.validators
            .get(&kind)
            .map(|validator| validator.validate(instance))
            .ok_or(SchemaError::NotLoaded(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn manifest_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        })
    }

    #[test]
    fn validates_against_registered_kind() {
        let mut registry = SchemaRegistry::new();
        registry.insert(SchemaKind::Manifest, &manifest_schema()).unwrap();

        assert!(registry.validate(SchemaKind::Manifest, &json!({ "name": "planner" })).unwrap().valid);
        assert!(!registry.validate(SchemaKind::Manifest, &json!({})).unwrap().valid);
        assert_eq!(registry.loaded(), vec![SchemaKind::Manifest]);
    }

    #[test]
    fn unloaded_kind_is_an_error() {
        let registry = SchemaRegistry::new();
        let err = registry.validate(SchemaKind::Adp, &json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::NotLoaded(SchemaKind::Adp)));
        assert_eq!(err.to_string(), "No schema loaded for ADP-1");
    }

    #[test]
    fn loads_schema_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", manifest_schema()).unwrap();

        let mut registry = SchemaRegistry::new();
        registry.load_file(SchemaKind::Pvs, file.path()).unwrap();
        assert!(registry.is_loaded(SchemaKind::Pvs));
    }

    #[test]
    fn reports_unreadable_and_malformed_files() {
        let mut registry = SchemaRegistry::new();
        let err = registry
            .load_file(SchemaKind::Adp, "/nonexistent/adp-1.schema.json")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = registry.load_file(SchemaKind::Adp, file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::Json { .. }));
        assert!(!registry.is_loaded(SchemaKind::Adp));
    }
}
