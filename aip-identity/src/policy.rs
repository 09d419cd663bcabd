use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::oids::AipOid;
use crate::rules::{CertificateRule, LifetimeRule, RequiredExtensionRule, ValidityWindowRule};

pub const DEFAULT_MAX_LIFETIME_MINUTES: u32 = 15;

/// Tunable part of the AIP-1 pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AipPolicy {
    /// Longest allowed `notAfter - notBefore`.
    pub max_lifetime_minutes: u32,
    /// Extensions checked for presence, in report order.
    pub required_extensions: Vec<AipOid>,
}

impl Default for AipPolicy {
    fn default() -> Self {
        Self {
            max_lifetime_minutes: DEFAULT_MAX_LIFETIME_MINUTES,
            required_extensions: AipOid::REQUIRED.to_vec(),
        }
    }
}

impl AipPolicy {
    /// Build a policy from configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] for an unknown extension name or a zero
    /// lifetime cap.
    pub fn from_names<S: AsRef<str>>(
        max_lifetime_minutes: u32,
        required_extensions: &[S],
    ) -> Result<Self, PolicyError> {
        if max_lifetime_minutes == 0 {
            return Err(PolicyError::ZeroLifetime);
        }

        let mut oids: Vec<AipOid> = Vec::with_capacity(required_extensions.len());
        for name in required_extensions {
            let oid: AipOid = name.as_ref().parse()?;
            if !oids.contains(&oid) {
                oids.push(oid);
            }
        }

        Ok(Self {
            max_lifetime_minutes,
            required_extensions: oids,
        })
    }

    /// Materialize the rule list, in evaluation order.
    pub fn rules(&self) -> Vec<Box<dyn CertificateRule>> {
        let mut rules: Vec<Box<dyn CertificateRule>> = vec![
            Box::new(ValidityWindowRule),
            Box::new(LifetimeRule::new(self.max_lifetime_minutes)),
        ];
        rules.extend(
            self.required_extensions
                .iter()
                .map(|oid| Box::new(RequiredExtensionRule::new(*oid)) as Box<dyn CertificateRule>),
        );
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requires_version_tenant_capabilities() {
        let policy = AipPolicy::default();
        assert_eq!(policy.max_lifetime_minutes, 15);
        assert_eq!(
            policy.required_extensions,
            vec![AipOid::Version, AipOid::TenantId, AipOid::Capabilities]
        );

        let ids: Vec<String> = policy.rules().iter().map(|r| r.id().to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "validity-window",
                "lifetime",
                "1.3.6.1.4.1.59999.1.1",
                "1.3.6.1.4.1.59999.1.3",
                "1.3.6.1.4.1.59999.1.4",
            ]
        );
    }

    #[test]
    fn from_names_keeps_order_and_drops_duplicates() {
        let policy =
            AipPolicy::from_names(10, &["version", "tenant-id", "capabilities", "role", "Version"])
                .unwrap();
        assert_eq!(policy.max_lifetime_minutes, 10);
        assert_eq!(
            policy.required_extensions,
            vec![AipOid::Version, AipOid::TenantId, AipOid::Capabilities, AipOid::Role]
        );
    }

    #[test]
    fn from_names_rejects_bad_input() {
        assert_eq!(
            AipPolicy::from_names(0, &["version"]),
            Err(PolicyError::ZeroLifetime)
        );
        assert_eq!(
            AipPolicy::from_names(15, &["clearance"]),
            Err(PolicyError::UnknownExtension("clearance".to_string()))
        );
    }
}
