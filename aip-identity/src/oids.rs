use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PolicyError;

/// Private enterprise arc every AIP-1 extension lives under.
pub const AIP_ARC: &str = "1.3.6.1.4.1.59999.1";

/// AIP-1 extension registry.
///
/// The OID strings are wire format shared with certificate issuers and
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AipOid {
    Version,
    Role,
    TenantId,
    Capabilities,
    AnchorChain,
    Audience,
    Environment,
}

impl AipOid {
    /// Registry declaration order.
    pub const ALL: [AipOid; 7] = [
        AipOid::Version,
        AipOid::Role,
        AipOid::TenantId,
        AipOid::Capabilities,
        AipOid::AnchorChain,
        AipOid::Audience,
        AipOid::Environment,
    ];

    /// Extensions a certificate must carry under the default policy.
    pub const REQUIRED: [AipOid; 3] = [AipOid::Version, AipOid::TenantId, AipOid::Capabilities];

    pub fn as_str(&self) -> &'static str {
        match self {
            AipOid::Version => "1.3.6.1.4.1.59999.1.1",
            AipOid::Role => "1.3.6.1.4.1.59999.1.2",
            AipOid::TenantId => "1.3.6.1.4.1.59999.1.3",
            AipOid::Capabilities => "1.3.6.1.4.1.59999.1.4",
            AipOid::AnchorChain => "1.3.6.1.4.1.59999.1.5",
            AipOid::Audience => "1.3.6.1.4.1.59999.1.6",
            AipOid::Environment => "1.3.6.1.4.1.59999.1.7",
        }
    }

    /// Arc components, for issuers that build extensions from integers.
    pub fn arcs(&self) -> [u64; 9] {
        let leaf = match self {
            AipOid::Version => 1,
            AipOid::Role => 2,
            AipOid::TenantId => 3,
            AipOid::Capabilities => 4,
            AipOid::AnchorChain => 5,
            AipOid::Audience => 6,
            AipOid::Environment => 7,
        };
        [1, 3, 6, 1, 4, 1, 59999, 1, leaf]
    }

    /// Name used in `OID: <name>` check results.
    pub fn display_name(&self) -> &'static str {
        match self {
            AipOid::Version => "AIP-Version",
            AipOid::Role => "Role",
            AipOid::TenantId => "Tenant-ID",
            AipOid::Capabilities => "Capability-Set",
            AipOid::AnchorChain => "Anchor-Chain",
            AipOid::Audience => "Audience",
            AipOid::Environment => "Environment",
        }
    }

    /// Configuration key, e.g. `tenant-id`.
    pub fn key(&self) -> &'static str {
        match self {
            AipOid::Version => "version",
            AipOid::Role => "role",
            AipOid::TenantId => "tenant-id",
            AipOid::Capabilities => "capabilities",
            AipOid::AnchorChain => "anchor-chain",
            AipOid::Audience => "audience",
            AipOid::Environment => "environment",
        }
    }

    pub fn from_oid(oid: &str) -> Option<AipOid> {
        Self::ALL.into_iter().find(|entry| entry.as_str() == oid)
    }
}

impl fmt::Display for AipOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AipOid {
    type Err = PolicyError;

    /// Accepts the configuration key, the display name, the variant name or
    /// the dotted OID, ignoring case and `-`/`_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let found = match normalized.as_str() {
            "version" | "aipversion" => Some(AipOid::Version),
            "role" => Some(AipOid::Role),
            "tenantid" | "tenant" => Some(AipOid::TenantId),
            "capabilities" | "capabilityset" => Some(AipOid::Capabilities),
            "anchorchain" => Some(AipOid::AnchorChain),
            "audience" => Some(AipOid::Audience),
            "environment" => Some(AipOid::Environment),
            _ => AipOid::from_oid(s.trim()),
        };

        found.ok_or_else(|| PolicyError::UnknownExtension(s.to_string()))
    }
}

impl TryFrom<String> for AipOid {
    type Error = PolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AipOid> for String {
    fn from(value: AipOid) -> Self {
        value.key().to_string()
    }
}
