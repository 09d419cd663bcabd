//! JSON-schema validation for the agent control record formats
//!
//! ADP-1 run records, PVS-1 documents and agent manifests are validated by
//! delegating to a compiled JSON Schema (draft 2020-12, format assertions
//! on). Every violation the engine finds is reported, not just the first.
//!
//! The schema documents are deployment inputs: the registry loads them from
//! files at startup and holds one compiled validator per kind.

pub mod error;
pub mod registry;
pub mod validator;

pub use error::*;
pub use registry::*;
pub use validator::*;
