use std::path::PathBuf;
use thiserror::Error;

use crate::registry::SchemaKind;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid JSON Schema: {0}")]
    InvalidSchema(String),

    #[error("Failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No schema loaded for {0}")]
    NotLoaded(SchemaKind),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
