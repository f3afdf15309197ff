//! Typed resource-type key
//!
//! A resource's type is identified by its API group and kind. Ignore rules
//! and compiled removals are scoped by this key, so equality on `GroupKind`
//! is what decides whether a rule applies to a resource at all.

use serde::{Deserialize, Serialize};

/// Two-part identifier for a resource's type
///
/// The group is empty for core-group resources. Two keys are equal only if
/// both parts match exactly; there is no wildcard matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKind {
    group: String,
    kind: String,
}

impl GroupKind {
    /// Create a key from its parts
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }

    /// Parse an override map key of the form `"group/kind"`
    ///
    /// Returns `None` when the key has fewer than two `/`-separated
    /// segments. Callers skip such entries silently: unrecognized key
    /// shapes are reserved for future override kinds, not errors.
    /// Segments beyond the second are ignored.
    pub fn parse_override_key(key: &str) -> Option<Self> {
        let mut parts = key.split('/');
        let group = parts.next()?;
        let kind = parts.next()?;
        Some(Self::new(group, kind))
    }

    /// Get the API group (empty for core-group resources)
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Get the resource kind
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.group, self.kind)
    }
}
