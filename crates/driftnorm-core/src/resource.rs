//! Unstructured resource documents
//!
//! The normalizer consumes resources through a small contract: read access
//! to the type key and instance identity, plus a byte round-trip through the
//! document form. `Unstructured` satisfies that contract over a plain JSON
//! document, reading identity from the conventional `apiVersion`/`kind`/
//! `metadata` fields.

use serde_json::Value;

use crate::errors::{NormalizeError, Result};
use driftnorm_core_types::GroupKind;

/// A resource held as a raw JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct Unstructured {
    doc: Value,
}

impl Unstructured {
    /// Wrap an existing document
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    /// Parse a resource from document bytes
    ///
    /// # Errors
    ///
    /// Returns `Deserialize` when the bytes are not a valid document.
    pub fn from_document(bytes: &[u8]) -> Result<Self> {
        let doc = serde_json::from_slice(bytes).map_err(|e| NormalizeError::Deserialize {
            message: e.to_string(),
        })?;
        Ok(Self { doc })
    }

    /// Get the API group, parsed from `apiVersion`
    ///
    /// `apps/v1` yields `apps`; a version-only `apiVersion` such as `v1`
    /// yields the empty core group.
    pub fn group(&self) -> &str {
        let api_version = self.str_field(&["apiVersion"]);
        match api_version.split_once('/') {
            Some((group, _version)) => group,
            None => "",
        }
    }

    /// Get the resource kind
    pub fn kind(&self) -> &str {
        self.str_field(&["kind"])
    }

    /// Get the instance name
    pub fn name(&self) -> &str {
        self.str_field(&["metadata", "name"])
    }

    /// Get the instance namespace (empty for cluster-scoped resources)
    pub fn namespace(&self) -> &str {
        self.str_field(&["metadata", "namespace"])
    }

    /// Get the typed (group, kind) key
    pub fn group_kind(&self) -> GroupKind {
        GroupKind::new(self.group(), self.kind())
    }

    /// Serialize to document bytes
    ///
    /// # Errors
    ///
    /// Returns `Serialize` when the document cannot be encoded.
    pub fn to_document(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(&self.doc).map_err(|e| NormalizeError::Serialize {
            message: e.to_string(),
        })
    }

    /// Replace this resource's fields from document bytes, in place
    ///
    /// # Errors
    ///
    /// Returns `Deserialize` when the bytes are not a valid document; the
    /// resource is left unchanged in that case.
    pub fn replace_from_document(&mut self, bytes: &[u8]) -> Result<()> {
        let doc = serde_json::from_slice(bytes).map_err(|e| NormalizeError::Deserialize {
            message: e.to_string(),
        })?;
        self.doc = doc;
        Ok(())
    }

    /// Borrow the underlying document
    pub fn value(&self) -> &Value {
        &self.doc
    }

    /// Unwrap into the underlying document
    pub fn into_value(self) -> Value {
        self.doc
    }

    fn str_field(&self, path: &[&str]) -> &str {
        let mut current = &self.doc;
        for key in path {
            match current.get(key) {
                Some(child) => current = child,
                None => return "",
            }
        }
        current.as_str().unwrap_or("")
    }
}

impl From<Value> for Unstructured {
    fn from(doc: Value) -> Self {
        Self::new(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn deployment() -> Unstructured {
        Unstructured::new(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {"replicas": 3}
        }))
    }

    #[test]
    fn test_identity_accessors() {
        let r = deployment();
        assert_eq!(r.group(), "apps");
        assert_eq!(r.kind(), "Deployment");
        assert_eq!(r.name(), "web");
        assert_eq!(r.namespace(), "prod");
        assert_eq!(r.group_kind(), GroupKind::new("apps", "Deployment"));
    }

    #[test]
    fn test_core_group_is_empty() {
        let r = Unstructured::new(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings"}
        }));
        assert_eq!(r.group(), "");
        assert_eq!(r.namespace(), "");
    }

    #[test]
    fn test_document_round_trip() {
        let r = deployment();
        let bytes = r.to_document().unwrap();
        let back = Unstructured::from_document(&bytes).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_replace_from_document_rejects_garbage_and_keeps_state() {
        let mut r = deployment();
        let before = r.clone();
        let err = r.replace_from_document(b"not json").unwrap_err();
        assert_eq!(err.code(), "ERR_DESERIALIZE");
        assert_eq!(r, before);
    }
}
