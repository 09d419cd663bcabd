use serde::Serialize;

/// Check name used for both the parse failure and the parse success entry.
pub const FORMAT_CHECK: &str = "Format";

/// Outcome of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
        }
    }
}

/// Verdict plus the ordered checks that produced it.
///
/// Only constructible from a check list, so `valid` always equals the AND
/// of every `passed` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    checks: Vec<CheckResult>,
}

impl ValidationResult {
    pub fn from_checks(checks: Vec<CheckResult>) -> Self {
        let valid = checks.iter().all(|check| check.passed);
        Self { valid, checks }
    }

    pub fn valid(&self) -> bool {
        self.valid
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.name == name)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|check| !check.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_is_and_of_checks() {
        let ok = ValidationResult::from_checks(vec![
            CheckResult::pass("Format", "ok"),
            CheckResult::pass("Lifetime", "ok"),
        ]);
        assert!(ok.valid());

        let bad = ValidationResult::from_checks(vec![
            CheckResult::pass("Format", "ok"),
            CheckResult::fail("Lifetime", "too long"),
        ]);
        assert!(!bad.valid());
        assert_eq!(bad.failures().count(), 1);
        assert_eq!(bad.valid(), bad.checks().iter().all(|check| check.passed));
        assert_eq!(bad.check("Lifetime").map(|check| check.passed), Some(false));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let result = ValidationResult::from_checks(vec![CheckResult::fail(
            FORMAT_CHECK,
            "Failed to parse certificate: Empty Input",
        )]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": false,
                "checks": [{
                    "name": "Format",
                    "passed": false,
                    "message": "Failed to parse certificate: Empty Input"
                }]
            })
        );
    }
}
