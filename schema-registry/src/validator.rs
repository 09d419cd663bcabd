use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, SchemaError};

/// One violation, as reported by the schema engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaViolation {
    /// JSON Pointer into the validated document.
    pub instance_path: String,
    /// JSON Pointer into the schema to the failing keyword.
    pub schema_path: String,
    pub message: String,
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub valid: bool,
    pub errors: Vec<SchemaViolation>,
}

impl SchemaReport {
    fn from_errors(errors: Vec<SchemaViolation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// A compiled JSON Schema.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile `schema`. Format keywords are asserted, not just annotated.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if `schema` is not a valid
    /// JSON Schema.
    pub fn compile(schema: &Value) -> Result<Self> {
        let validator = jsonschema::options()
            .should_validate_formats(true)
            .build(schema)
            .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;

        Ok(Self { validator })
    }

    /// Validate `instance`, collecting every violation.
    pub fn validate(&self, instance: &Value) -> SchemaReport {
        let errors = self
            .validator
            .iter_errors(instance)
            .map(|error| SchemaViolation {
                instance_path: error.instance_path.to_string(),
                schema_path: error.schema_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        SchemaReport::from_errors(errors)
    }
}
