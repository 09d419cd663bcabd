//! AIP-1 agent identity certificate validation
//!
//! AIP-1 issues short-lived X.509 identities to software agents. Each
//! certificate carries custom extensions under the `1.3.6.1.4.1.59999.1`
//! arc describing the protocol version, tenant and capability set of the
//! agent it identifies.
//!
//! Validation runs a fixed pipeline over one PEM certificate:
//!
//! - **Format**: the PEM armor and DER body must decode. This is the only
//!   hard failure; nothing else runs when it fails.
//! - **Validity window**: exactly one of `Expiration`, `Activation` or
//!   `Validity` is reported for the current time.
//! - **Lifetime**: `notAfter - notBefore` must not exceed the policy cap
//!   (15 minutes by default).
//! - **Required extensions**: one `OID: <name>` check per required
//!   registry entry.
//!
//! Every check after Format runs even when an earlier one failed, so the
//! caller always gets the full diagnostic picture.
//!
//! # Example
//!
//! ```rust,ignore
//! use aip_identity::{AipPolicy, AipValidator};
//!
//! let validator = AipValidator::new(AipPolicy::default());
//! let result = validator.validate(&pem_text);
//!
//! for check in result.checks() {
//!     println!("{:<20} {} {}", check.name, check.passed, check.message);
//! }
//! assert_eq!(result.valid(), result.checks().iter().all(|c| c.passed));
//! ```

pub mod clock;
pub mod decoder;
pub mod error;
pub mod models;
pub mod oids;
pub mod policy;
pub mod rules;
pub mod validator;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use clock::*;
pub use decoder::*;
pub use error::*;
pub use models::*;
pub use oids::*;
pub use policy::*;
pub use validator::*;

use chrono::{DateTime, Utc};

/// Validate a PEM certificate against the default AIP-1 policy using the
/// system clock.
pub fn validate(pem_text: &str) -> ValidationResult {
    AipValidator::default().validate(pem_text)
}

/// Validate a PEM certificate against the default AIP-1 policy at `now`.
pub fn validate_at(pem_text: &str, now: DateTime<Utc>) -> ValidationResult {
    AipValidator::default().validate_at(pem_text, now)
}
