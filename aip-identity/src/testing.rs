//! Self-signed AIP-1 certificates for tests.
//!
//! Enabled for dependents through the `test-support` feature.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, DurationRound, Utc};
use der::{asn1::Utf8StringRef, Encode};
use rcgen::{CertificateParams, CustomExtension, KeyPair};
use time::OffsetDateTime;

use crate::oids::AipOid;

const SUBJECT_ALT_NAME: &str = "agent.aip.local";

/// Builds a PEM certificate with an explicit window and AIP extensions.
#[derive(Debug, Clone)]
pub struct AgentCertBuilder {
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    extensions: Vec<(AipOid, String)>,
}

impl Default for AgentCertBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentCertBuilder {
    /// Ten minute window starting at the current second, no extensions.
    pub fn new() -> Self {
        let now = Utc::now();
        let now = now.duration_trunc(Duration::seconds(1)).unwrap_or(now);
        Self {
            not_before: now,
            not_after: now + Duration::minutes(10),
            extensions: Vec::new(),
        }
    }

    pub fn valid_between(mut self, not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> Self {
        self.not_before = not_before;
        self.not_after = not_after;
        self
    }

    pub fn valid_for(mut self, lifetime: Duration) -> Self {
        self.not_after = self.not_before + lifetime;
        self
    }

    /// Adds `oid` with `value` encoded as a DER UTF8String.
    pub fn with_extension(mut self, oid: AipOid, value: impl Into<String>) -> Self {
        self.extensions.push((oid, value.into()));
        self
    }

    /// Version, Tenant-ID and Capabilities with placeholder values.
    pub fn with_standard_extensions(self) -> Self {
        self.with_extension(AipOid::Version, "1")
            .with_extension(AipOid::TenantId, "tenant-demo")
            .with_extension(AipOid::Capabilities, "perm:files:read")
    }

    pub fn build(&self) -> Result<String> {
        let mut params = CertificateParams::new(vec![SUBJECT_ALT_NAME.to_string()])?;
        params.not_before = to_offset(self.not_before)?;
        params.not_after = to_offset(self.not_after)?;
        params.custom_extensions = self
            .extensions
            .iter()
            .map(|(oid, value)| -> Result<CustomExtension> {
                let content = Utf8StringRef::new(value)?.to_der()?;
                Ok(CustomExtension::from_oid_content(&oid.arcs(), content))
            })
            .collect::<Result<Vec<_>>>()?;

        let key = KeyPair::generate()?;
        let cert = params.self_signed(&key)?;
        Ok(cert.pem())
    }
}

fn to_offset(ts: DateTime<Utc>) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(ts.timestamp())
        .with_context(|| format!("timestamp {ts} not representable"))
}
