use chrono::{DateTime, SecondsFormat, Utc};

use crate::decoder::DecodedCertificate;
use crate::models::CheckResult;
use crate::oids::AipOid;

/// One step of the post-parse pipeline.
///
/// Rules never short-circuit each other; each produces exactly one check.
pub trait CertificateRule: Send + Sync {
    /// Stable identifier used in logs.
    fn id(&self) -> &str;

    fn evaluate(&self, cert: &DecodedCertificate, now: DateTime<Utc>) -> CheckResult;
}

/// Produces exactly one of `Expiration`, `Activation` or `Validity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityWindowRule;

impl CertificateRule for ValidityWindowRule {
    fn id(&self) -> &str {
        "validity-window"
    }

    fn evaluate(&self, cert: &DecodedCertificate, now: DateTime<Utc>) -> CheckResult {
        if now > cert.not_after {
            CheckResult::fail(
                "Expiration",
                format!("Certificate Expired at {}", iso8601(cert.not_after)),
            )
        } else if now < cert.not_before {
            CheckResult::fail(
                "Activation",
                format!("Certificate not valid until {}", iso8601(cert.not_before)),
            )
        } else {
            CheckResult::pass("Validity", "Certificate is currently within validity window")
        }
    }
}

/// Caps `notAfter - notBefore`, independent of the current time.
#[derive(Debug, Clone, Copy)]
pub struct LifetimeRule {
    pub max_minutes: u32,
}

impl LifetimeRule {
    pub fn new(max_minutes: u32) -> Self {
        Self { max_minutes }
    }
}

impl CertificateRule for LifetimeRule {
    fn id(&self) -> &str {
        "lifetime"
    }

    fn evaluate(&self, cert: &DecodedCertificate, _now: DateTime<Utc>) -> CheckResult {
        if cert.not_after < cert.not_before {
            return CheckResult::fail(
                "Malformed Dates",
                format!(
                    "notAfter {} precedes notBefore {}",
                    iso8601(cert.not_after),
                    iso8601(cert.not_before)
                ),
            );
        }

        let duration_ms = (cert.not_after - cert.not_before).num_milliseconds();
        let duration_minutes = duration_ms as f64 / 60_000.0;
        let shown = round_half_up(duration_minutes);

        if duration_minutes > f64::from(self.max_minutes) {
            CheckResult::fail(
                "Lifetime",
                format!("Duration is {shown:.1} mins (Max allowed: {} mins)", self.max_minutes),
            )
        } else {
            CheckResult::pass(
                "Lifetime",
                format!("Duration is {shown:.1} mins (<= {} mins)", self.max_minutes),
            )
        }
    }
}

/// Presence check for one registry extension. The value is not inspected.
#[derive(Debug, Clone)]
pub struct RequiredExtensionRule {
    oid: AipOid,
    check_name: String,
}

impl RequiredExtensionRule {
    pub fn new(oid: AipOid) -> Self {
        Self {
            oid,
            check_name: format!("OID: {}", oid.display_name()),
        }
    }
}

impl CertificateRule for RequiredExtensionRule {
    fn id(&self) -> &str {
        self.oid.as_str()
    }

    fn evaluate(&self, cert: &DecodedCertificate, _now: DateTime<Utc>) -> CheckResult {
        let oid = self.oid.as_str();
        if cert.has_extension(oid) {
            CheckResult::pass(self.check_name.clone(), format!("Found {oid}"))
        } else {
            CheckResult::fail(
                self.check_name.clone(),
                format!("Missing required extension {oid}"),
            )
        }
    }
}

/// One decimal place, ties away from zero. `{:.1}` alone rounds ties to even.
fn round_half_up(minutes: f64) -> f64 {
    (minutes * 10.0).round() / 10.0
}

fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
