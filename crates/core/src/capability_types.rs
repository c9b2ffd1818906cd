// Capability type definitions
//
// Capability IDs are strings so plugins can introduce new capabilities
// without host changes. Validation happens at the registry level.

use serde::{Deserialize, Serialize};

/// Capability identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityId(String);

impl CapabilityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dify workflow capability
    pub const DIFY_WORKFLOW: &'static str = "dify_workflow";

    pub fn dify_workflow() -> Self {
        Self::new(Self::DIFY_WORKFLOW)
    }
}

impl std::fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CapabilityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CapabilityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CapabilityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Capability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    /// Capability is ready to use
    Available,
    /// Capability is registered but cannot run until it is configured
    NeedsConfiguration,
    /// Capability is deprecated
    Deprecated,
}
