use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::decoder::{CertificateDecoder, X509Decoder};
use crate::models::{CheckResult, ValidationResult, FORMAT_CHECK};
use crate::policy::AipPolicy;
use crate::rules::CertificateRule;

/// AIP-1 certificate validator.
///
/// Stateless between calls; share one instance behind an `Arc`.
pub struct AipValidator<D = X509Decoder> {
    decoder: D,
    rules: Vec<Box<dyn CertificateRule>>,
    clock: Arc<dyn Clock>,
    policy: AipPolicy,
}

impl AipValidator<X509Decoder> {
    pub fn new(policy: AipPolicy) -> Self {
        Self::with_decoder(X509Decoder, policy)
    }
}

impl Default for AipValidator<X509Decoder> {
    fn default() -> Self {
        Self::new(AipPolicy::default())
    }
}

impl<D: CertificateDecoder> AipValidator<D> {
    pub fn with_decoder(decoder: D, policy: AipPolicy) -> Self {
        Self {
            decoder,
            rules: policy.rules(),
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    /// Replace the clock used by [`AipValidator::validate`].
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn policy(&self) -> &AipPolicy {
        &self.policy
    }

    /// Validate against the validator's clock.
    pub fn validate(&self, pem_text: &str) -> ValidationResult {
        self.validate_at(pem_text, self.clock.now())
    }

    /// Validate as of `now`.
    pub fn validate_at(&self, pem_text: &str, now: DateTime<Utc>) -> ValidationResult {
        let cert = match self.decoder.decode(pem_text) {
            Ok(cert) => cert,
            Err(e) => {
                debug!(error = %e, "AIP certificate failed to decode");
                return ValidationResult::from_checks(vec![CheckResult::fail(
                    FORMAT_CHECK,
                    format!("Failed to parse certificate: {e}"),
                )]);
            }
        };

        let mut checks = Vec::with_capacity(self.rules.len() + 1);
        checks.push(CheckResult::pass(FORMAT_CHECK, "Valid X.509 Certificate Format"));

        for rule in &self.rules {
            let check = rule.evaluate(&cert, now);
            debug!(rule = rule.id(), check = %check.name, passed = check.passed, "AIP rule evaluated");
            checks.push(check);
        }

        let result = ValidationResult::from_checks(checks);
        debug!(
            valid = result.valid(),
            failed = result.failures().count(),
            not_before = %cert.not_before,
            not_after = %cert.not_after,
            "AIP certificate validated"
        );
        result
    }
}
