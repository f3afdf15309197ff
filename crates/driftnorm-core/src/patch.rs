//! Executable field-removal patches
//!
//! Each compiled removal is a single-operation patch document
//! `[{"op": "remove", "path": "<pointer>"}]`. One patch per (rule, path)
//! pair: a path that turns out to be absent in one patch can never block
//! the removals behind it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::errors::{NormalizeError, Result};
use crate::pointer::FieldPointer;

/// One patch operation in the wire format
///
/// Only `remove` is ever emitted by the rule compiler; the tagged encoding
/// keeps the document form compatible with standard patch tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOp {
    /// Delete the value at `path`
    Remove { path: String },
}

/// Why a single removal could not be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The targeted field is absent from the document. Callers treat this
    /// as a no-op for the removal, never as a failure of the whole call.
    #[error("no value at '{pointer}'")]
    PathAbsent { pointer: String },

    /// The root pointer addresses the whole document, which cannot be
    /// removed.
    #[error("cannot remove the document root")]
    RemoveRoot,

    /// A non-numeric token addressed an array.
    #[error("'{token}' is not a valid array index at '{pointer}'")]
    BadIndex { pointer: String, token: String },
}

/// A compiled, executable single-field removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovePatch {
    pointer: FieldPointer,
}

impl RemovePatch {
    /// Compile a field path into an executable removal
    ///
    /// Builds the canonical single-operation patch document, round-trips it
    /// through the wire encoding, and parses the operation's pointer. Any
    /// failure along the way is fatal to normalizer construction.
    ///
    /// # Errors
    ///
    /// Returns `PatchBuild` when the document cannot be encoded or the
    /// pointer is not valid pointer syntax.
    pub fn compile(path: &str) -> Result<Self> {
        let doc = serde_json::to_vec(&[PatchOp::Remove {
            path: path.to_string(),
        }])
        .map_err(|e| NormalizeError::PatchBuild {
            pointer: path.to_string(),
            message: format!("cannot encode patch document: {}", e),
        })?;
        let mut ops: Vec<PatchOp> =
            serde_json::from_slice(&doc).map_err(|e| NormalizeError::PatchBuild {
                pointer: path.to_string(),
                message: format!("cannot decode patch document: {}", e),
            })?;
        let PatchOp::Remove { path } = ops.pop().ok_or_else(|| NormalizeError::PatchBuild {
            pointer: path.to_string(),
            message: "patch document is empty".to_string(),
        })?;
        Ok(Self {
            pointer: FieldPointer::parse(&path)?,
        })
    }

    /// Get the compiled pointer
    pub fn pointer(&self) -> &FieldPointer {
        &self.pointer
    }

    /// Apply the removal to a document
    ///
    /// Removes exactly the addressed value, leaving siblings untouched. The
    /// document is never mutated on error: removal happens only after the
    /// full path has resolved.
    ///
    /// # Errors
    ///
    /// - `PathAbsent`: a token along the path does not resolve (missing
    ///   key, out-of-range or end-of-array index, traversal into a scalar)
    /// - `RemoveRoot`: the pointer is the root pointer
    /// - `BadIndex`: a non-numeric token addressed an array
    pub fn apply(&self, doc: &mut Value) -> std::result::Result<(), PatchError> {
        let Some((last, parents)) = self.pointer.tokens().split_last() else {
            return Err(PatchError::RemoveRoot);
        };

        let mut current = doc;
        for token in parents {
            current = match current {
                Value::Object(map) => match map.get_mut(token) {
                    Some(child) => child,
                    None => return Err(self.absent()),
                },
                Value::Array(items) => {
                    let index = self.parse_index(token)?;
                    match items.get_mut(index) {
                        Some(child) => child,
                        None => return Err(self.absent()),
                    }
                }
                _ => return Err(self.absent()),
            };
        }

        match current {
            Value::Object(map) => {
                if map.remove(last).is_none() {
                    return Err(self.absent());
                }
            }
            Value::Array(items) => {
                let index = self.parse_index(last)?;
                if index >= items.len() {
                    return Err(self.absent());
                }
                items.remove(index);
            }
            _ => return Err(self.absent()),
        }
        Ok(())
    }

    /// Resolve one token as an array index
    ///
    /// `-` (the end-of-array position) never holds a removable value and is
    /// reported as absent.
    fn parse_index(&self, token: &str) -> std::result::Result<usize, PatchError> {
        if token == "-" {
            return Err(self.absent());
        }
        token.parse::<usize>().map_err(|_| PatchError::BadIndex {
            pointer: self.pointer.as_str().to_string(),
            token: token.to_string(),
        })
    }

    fn absent(&self) -> PatchError {
        PatchError::PathAbsent {
            pointer: self.pointer.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_produces_wire_compatible_op() {
        let encoded = serde_json::to_value([PatchOp::Remove {
            path: "/spec/replicas".to_string(),
        }])
        .unwrap();
        assert_eq!(encoded, json!([{"op": "remove", "path": "/spec/replicas"}]));
    }

    #[test]
    fn test_compile_rejects_invalid_pointer() {
        let err = RemovePatch::compile("spec/replicas").unwrap_err();
        assert_eq!(err.code(), "ERR_PATCH_BUILD");
    }

    #[test]
    fn test_apply_removes_only_the_addressed_value() {
        let patch = RemovePatch::compile("/spec/replicas").unwrap();
        let mut doc = json!({"spec": {"replicas": 3, "paused": false}});
        patch.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"spec": {"paused": false}}));
    }

    #[test]
    fn test_apply_removes_array_element() {
        let patch = RemovePatch::compile("/spec/containers/1").unwrap();
        let mut doc = json!({"spec": {"containers": [{"name": "a"}, {"name": "b"}]}});
        patch.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"spec": {"containers": [{"name": "a"}]}}));
    }

    #[test]
    fn test_apply_missing_key_is_path_absent() {
        let patch = RemovePatch::compile("/spec/replicas").unwrap();
        let mut doc = json!({"spec": {"paused": false}});
        let before = doc.clone();
        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::PathAbsent { .. })
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_apply_missing_intermediate_is_path_absent() {
        let patch = RemovePatch::compile("/spec/template/metadata/labels").unwrap();
        let mut doc = json!({"spec": {}});
        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::PathAbsent { .. })
        ));
    }

    #[test]
    fn test_apply_through_scalar_is_path_absent() {
        let patch = RemovePatch::compile("/spec/replicas/nested").unwrap();
        let mut doc = json!({"spec": {"replicas": 3}});
        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::PathAbsent { .. })
        ));
    }

    #[test]
    fn test_apply_out_of_range_index_is_path_absent() {
        let patch = RemovePatch::compile("/items/5").unwrap();
        let mut doc = json!({"items": [1, 2, 3]});
        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::PathAbsent { .. })
        ));
    }

    #[test]
    fn test_apply_end_of_array_token_is_path_absent() {
        let patch = RemovePatch::compile("/items/-").unwrap();
        let mut doc = json!({"items": [1, 2, 3]});
        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::PathAbsent { .. })
        ));
    }

    #[test]
    fn test_apply_non_numeric_array_index_is_hard_error() {
        let patch = RemovePatch::compile("/items/first").unwrap();
        let mut doc = json!({"items": [1, 2, 3]});
        assert!(matches!(
            patch.apply(&mut doc),
            Err(PatchError::BadIndex { .. })
        ));
    }

    #[test]
    fn test_apply_root_pointer_is_hard_error() {
        let patch = RemovePatch::compile("").unwrap();
        let mut doc = json!({"spec": {}});
        assert_eq!(patch.apply(&mut doc), Err(PatchError::RemoveRoot));
    }

    #[test]
    fn test_apply_escaped_pointer() {
        let patch =
            RemovePatch::compile("/metadata/annotations/deployment.example.com~1revision").unwrap();
        let mut doc = json!({
            "metadata": {"annotations": {
                "deployment.example.com/revision": "4",
                "keep": "me"
            }}
        });
        patch.apply(&mut doc).unwrap();
        assert_eq!(doc, json!({"metadata": {"annotations": {"keep": "me"}}}));
    }
}
