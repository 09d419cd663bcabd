//! Layered configuration for the agent control validators
//!
//! Values resolve from lowest to highest precedence:
//!
//! - **Defaults**: the target type's `Default` implementation
//! - **File**: YAML, TOML or JSON, chosen by extension
//! - **Environment**: `<PREFIX>__SECTION__KEY`, e.g. `AGENTCTL__SERVER__PORT=9000`
//! - **Overrides**: explicit values, typically from command-line flags
//!
//! # Example
//!
//! ```rust,ignore
//! use config_engine::ConfigLoader;
//!
//! let settings: Settings = ConfigLoader::new("AGENTCTL")
//!     .with_optional_file("agentctl.yaml")
//!     .with_list_key("aip.required_extensions")
//!     .set_override("server.port", 9000_i64)
//!     .load()?;
//! ```

pub mod error;
pub mod loader;

pub use error::*;
pub use loader::*;
