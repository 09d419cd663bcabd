//! Common error handling for the agent control validators
//!
//! Two kinds of failure flow through the services:
//!
//! - **Verdicts**: an input that fails AIP-1, CTX-1 or a schema check. These
//!   are ordinary values returned by the validator crates, never errors.
//! - **Service errors**: configuration that does not load, a socket that
//!   does not bind, a schema file that does not compile. These are
//!   [`AgentCtlError`] and end the process at startup or turn into a 5xx at
//!   request time.
//!
//! [`codes`] holds the stable string codes carried in API error bodies so
//! clients can branch without parsing messages.
//!
//! # Example
//!
//! ```rust,ignore
//! use error_common::{AgentCtlError, Result};
//!
//! fn bind(addr: &str) -> Result<std::net::SocketAddr> {
//!     addr.parse()
//!         .map_err(|e| AgentCtlError::ConfigError(format!("invalid bind address {addr}: {e}")))
//! }
//! ```

pub mod codes;
pub mod types;

pub use types::*;
