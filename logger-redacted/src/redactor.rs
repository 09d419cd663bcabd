use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept in correlation tags.
const TAG_BYTES: usize = 8;

lazy_static! {
    #[allow(clippy::unwrap_used)]
    static ref PEM_REGEX: Regex = Regex::new(
        r"(?s)-----BEGIN ([A-Z0-9 ]+)-----.*?-----END [A-Z0-9 ]+-----"
    )
    .unwrap();
    #[allow(clippy::unwrap_used)]
    static ref BASE64_RUN_REGEX: Regex = Regex::new(r"[A-Za-z0-9+/]{64,}={0,2}").unwrap();
}

/// Input redaction configuration
#[derive(Debug, Clone)]
pub struct RedactionConfig {
    pub enabled: bool,
    pub redact_pem: bool,
    pub redact_base64: bool,
    pub hash_for_correlation: bool,
    /// Inputs longer than this (after redaction) are truncated.
    pub max_len: usize,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            redact_pem: true,
            redact_base64: true,
            hash_for_correlation: true,
            max_len: 256,
        }
    }
}

impl RedactionConfig {
    /// Pass inputs through unchanged.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Redactor for request inputs before they are logged
#[derive(Debug, Clone, Default)]
pub struct InputRedactor {
    config: RedactionConfig,
}

impl InputRedactor {
    pub fn new(config: RedactionConfig) -> Self {
        Self { config }
    }

    pub fn redact(&self, text: &str) -> String {
        if !self.config.enabled {
            return text.to_string();
        }

        let mut result = text.to_string();

        if self.config.redact_pem {
            result = self.redact_pem(&result);
        }

        if self.config.redact_base64 {
            result = self.redact_base64(&result);
        }

        self.truncate(result)
    }

    fn redact_pem(&self, text: &str) -> String {
        PEM_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                let label = caps.get(1).map_or("", |m| m.as_str());
                let block = caps.get(0).map_or("", |m| m.as_str());
                if self.config.hash_for_correlation {
                    format!("PEM[{}:{}]", label, self.hash_value(block))
                } else {
                    format!("PEM[{label}]")
                }
            })
            .to_string()
    }

    fn redact_base64(&self, text: &str) -> String {
        BASE64_RUN_REGEX
            .replace_all(text, |caps: &regex::Captures| {
                if self.config.hash_for_correlation {
                    let run = caps.get(0).map_or("", |m| m.as_str());
                    format!("B64[{}]", self.hash_value(run))
                } else {
                    "B64[***]".to_string()
                }
            })
            .to_string()
    }

    fn truncate(&self, text: String) -> String {
        if text.len() <= self.config.max_len {
            return text;
        }

        let cut = (0..=self.config.max_len)
            .rev()
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(0);
        let kept = text.get(..cut).unwrap_or_default();
        format!("{}...[{} more bytes]", kept, text.len().saturating_sub(cut))
    }

    fn hash_value(&self, value: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(value.as_bytes());
        let result = hasher.finalize();
        general_purpose::STANDARD.encode(result.get(..TAG_BYTES).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIBszCCAVmgAwIBAgIUFakeFakeFake\nAAAA\n-----END CERTIFICATE-----\n";

    #[test]
    fn test_pem_redaction_is_stable() {
        let redactor = InputRedactor::default();

        let first = redactor.redact(PEM);
        let second = redactor.redact(PEM);
        assert!(first.starts_with("PEM[CERTIFICATE:"));
        assert!(!first.contains("MIIB"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_pem_redaction_without_hash() {
        let redactor = InputRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        });

        let text = format!("pem={PEM}");
        assert_eq!(redactor.redact(&text), "pem=PEM[CERTIFICATE]\n");
    }

    #[test]
    fn test_base64_run_redaction() {
        let redactor = InputRedactor::new(RedactionConfig {
            hash_for_correlation: false,
            ..Default::default()
        });

        let text = format!("blob {} end", "QUJD".repeat(20));
        assert_eq!(redactor.redact(&text), "blob B64[***] end");
    }

    #[test]
    fn test_short_capability_strings_pass_through() {
        let redactor = InputRedactor::default();
        assert_eq!(redactor.redact("perm:files:read"), "perm:files:read");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let redactor = InputRedactor::new(RedactionConfig {
            max_len: 5,
            ..Default::default()
        });

        let redacted = redactor.redact("ééééé");
        assert_eq!(redacted, "éé...[6 more bytes]");
    }

    #[test]
    fn test_truncation_to_zero_keeps_nothing() {
        let redactor = InputRedactor::new(RedactionConfig {
            max_len: 0,
            ..Default::default()
        });

        assert_eq!(redactor.redact("é"), "...[2 more bytes]");
    }

    #[test]
    fn test_correlation_tags_use_digest_prefix() {
        let redactor = InputRedactor::default();
        let text = "QUJD".repeat(20);

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();
        let expected = general_purpose::STANDARD.encode(&digest[..TAG_BYTES]);

        assert_eq!(redactor.redact(&text), format!("B64[{expected}]"));
        // 8 bytes -> 12 base64 chars
        assert_eq!(expected.len(), 12);
    }

    #[test]
    fn test_disabled_redactor_is_identity() {
        let redactor = InputRedactor::new(RedactionConfig::disabled());
        assert_eq!(redactor.redact(PEM), PEM);
    }
}
