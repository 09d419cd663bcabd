use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{CtxError, Result};
use crate::is_capability;

/// Capability namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Perm,
    Agent,
    Tenant,
    Sys,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Perm => "perm",
            Namespace::Agent => "agent",
            Namespace::Tenant => "tenant",
            Namespace::Sys => "sys",
        }
    }
}

impl FromStr for Namespace {
    type Err = CtxError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "perm" => Ok(Namespace::Perm),
            "agent" => Ok(Namespace::Agent),
            "tenant" => Ok(Namespace::Tenant),
            "sys" => Ok(Namespace::Sys),
            other => Err(CtxError::UnknownNamespace(other.to_string())),
        }
    }
}

/// A parsed CTX-1 capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Capability {
    pub namespace: Namespace,
    pub segments: Vec<String>,
}

impl FromStr for Capability {
    type Err = CtxError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(CtxError::Empty);
        }

        let mut parts = s.split(':');
        let namespace: Namespace = parts.next().unwrap_or_default().parse()?;

        if !is_capability(s) {
            return Err(CtxError::InvalidFormat(s.to_string()));
        }

        Ok(Self {
            namespace,
            segments: parts.map(str::to_string).collect(),
        })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace.as_str())?;
        for segment in &self.segments {
            write!(f, ":{segment}")?;
        }
        Ok(())
    }
}
