//! CTX-1 capability strings
//!
//! A capability is `<namespace>:<segment>[:<segment>...]` where the
//! namespace is one of `perm`, `agent`, `tenant` or `sys` and every segment
//! is one or more of `[A-Za-z0-9_-]`.
//!
//! ```rust,ignore
//! use ctx_capability::{validate_ctx, Capability, Namespace};
//!
//! assert!(validate_ctx("perm:files:read").valid);
//! assert!(!validate_ctx("perm:files:read:").valid);
//!
//! let cap: Capability = "tenant:acme:billing".parse()?;
//! assert_eq!(cap.namespace, Namespace::Tenant);
//! assert_eq!(cap.segments, vec!["acme", "billing"]);
//! ```

pub mod capability;
pub mod error;

pub use capability::*;
pub use error::*;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    #[allow(clippy::unwrap_used)]
    static ref CTX_REGEX: Regex =
        Regex::new(r"^(perm|agent|tenant|sys):[a-zA-Z0-9_-]+(:[a-zA-Z0-9_-]+)*$").unwrap();
}

pub const EMPTY_INPUT_MESSAGE: &str = "Input is empty";
pub const VALID_MESSAGE: &str = "Valid CTX-1 Capability String";
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid Format. Must start with perm:, agent:, tenant:, or sys: and contain dot/colon separated segments.";

/// Verdict for one capability string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtxResult {
    pub valid: bool,
    pub message: String,
}

impl CtxResult {
    fn new(valid: bool, message: &str) -> Self {
        Self {
            valid,
            message: message.to_string(),
        }
    }
}

/// Check `input` against the CTX-1 grammar.
///
/// The input is matched as given; surrounding whitespace makes it invalid.
pub fn validate_ctx(input: &str) -> CtxResult {
    if input.trim().is_empty() {
        return CtxResult::new(false, EMPTY_INPUT_MESSAGE);
    }

    if is_capability(input) {
        CtxResult::new(true, VALID_MESSAGE)
    } else {
        CtxResult::new(false, INVALID_FORMAT_MESSAGE)
    }
}

pub fn is_capability(input: &str) -> bool {
    CTX_REGEX.is_match(input)
}
