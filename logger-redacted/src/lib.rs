//! Logging for the agent control validators
//!
//! Validation requests carry certificates and arbitrary JSON documents.
//! Logging them verbatim floods the logs and leaks identity material, so
//! request inputs go through [`InputRedactor`] before they reach a log
//! line:
//!
//! - **PEM blocks**: replaced by `PEM[<label>:<hash>]`
//! - **Long base64 runs**: replaced by `B64[<hash>]`
//! - **Oversized payloads**: truncated with a byte count
//!
//! Hashes are the first 8 bytes of a SHA-256, base64 encoded, so the same
//! certificate can be correlated across log lines without being readable.
//!
//! # Example
//!
//! ```rust,ignore
//! use logger_redacted::{init_tracing, InputRedactor, LoggerConfig, redacted_debug};
//!
//! init_tracing(&LoggerConfig::default(), "agentctl_server")?;
//!
//! let redactor = InputRedactor::default();
//! redacted_debug!(redactor, &pem_text, "AIP validation requested");
//! // input="PEM[CERTIFICATE:3q2+7w8AAAA=]" AIP validation requested
//! ```
//!
//! # Configuration
//!
//! ```yaml
//! logging:
//!   level: info
//!   format: json      # or "pretty"
//!   redact_inputs: true
//! ```

pub mod config;
pub mod macros;
pub mod redactor;
pub mod subscriber;

pub use config::*;
pub use redactor::*;
pub use subscriber::*;
