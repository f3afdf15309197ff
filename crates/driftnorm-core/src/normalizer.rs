//! Diff normalizer
//!
//! Compiles ignore rules into an immutable set of scoped field removals and
//! strips matching fields from resource documents before drift comparison.
//!
//! ## Atomicity Contract
//!
//! `normalize` guarantees:
//! - **All-or-nothing**: either every matching removal applies (or is
//!   skipped as path-absent) and the resource is rewritten from the final
//!   document, or the call fails and the resource is left exactly as
//!   received
//! - **No partial state**: removals are staged against a local copy of the
//!   serialized document; the resource mutates only at the final commit
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use driftnorm_core::{DiffNormalizer, IgnoreDifference, Normalizer, Unstructured};
//! use serde_json::json;
//!
//! let ignore = vec![IgnoreDifference {
//!     group: "apps".to_string(),
//!     kind: "Deployment".to_string(),
//!     field_paths: vec!["/spec/replicas".to_string()],
//!     ..IgnoreDifference::default()
//! }];
//! let normalizer = DiffNormalizer::new(ignore, &BTreeMap::new()).unwrap();
//!
//! let mut resource = Unstructured::new(json!({
//!     "apiVersion": "apps/v1",
//!     "kind": "Deployment",
//!     "metadata": {"name": "web"},
//!     "spec": {"replicas": 3, "paused": false}
//! }));
//! normalizer.normalize(&mut resource).unwrap();
//! assert_eq!(resource.value()["spec"], json!({"paused": false}));
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::{NormalizeError, Result};
use crate::patch::{PatchError, RemovePatch};
use crate::resource::Unstructured;
use crate::rules::{self, IgnoreDifference, ResourceOverride};
use driftnorm_core_types::GroupKind;

/// One compiled removal with its target scope
#[derive(Debug, Clone)]
struct NormalizerPatch {
    group_kind: GroupKind,
    name: String,
    namespace: String,
    patch: RemovePatch,
}

impl NormalizerPatch {
    /// A removal matches when the type key is equal and each non-empty
    /// scope field equals the resource's.
    fn matches(&self, resource: &Unstructured) -> bool {
        self.group_kind == resource.group_kind()
            && (self.name.is_empty() || self.name == resource.name())
            && (self.namespace.is_empty() || self.namespace == resource.namespace())
    }
}

/// Seam between the normalizer and the diff engine that consumes it
///
/// Implementations take exclusive mutable access to the resource for the
/// duration of the call and either commit a fully-normalized resource or
/// leave it exactly as received.
pub trait Normalizer {
    /// Strip ignored fields from `resource` in place
    ///
    /// # Errors
    ///
    /// Returns `Apply` when a removal fails for a reason other than "path
    /// absent", and `Serialize`/`Deserialize` when the resource cannot
    /// round-trip through the document form. On any error the resource is
    /// unchanged.
    fn normalize(&self, resource: &mut Unstructured) -> Result<()>;
}

/// Normalizer that removes ignored fields according to configured ignore
/// rules and per-type resource overrides
///
/// The compiled removal list is built once by [`DiffNormalizer::new`] and
/// read-only afterward, so a single instance may be shared across threads
/// normalizing different resources.
#[derive(Debug, Clone)]
pub struct DiffNormalizer {
    patches: Vec<NormalizerPatch>,
}

impl DiffNormalizer {
    /// Compile ignore rules and overrides into a normalizer
    ///
    /// Override-derived rules compile first (lexicographic key order), then
    /// the explicit rules in given order, each expanded path-by-path into
    /// one removal per path.
    ///
    /// # Errors
    ///
    /// - `ConfigParse`: an override's configuration text fails to
    ///   deserialize
    /// - `PatchBuild`: a field path cannot compile into a removal patch
    ///
    /// Both are fatal: no normalizer is produced.
    pub fn new(
        ignore: Vec<IgnoreDifference>,
        overrides: &BTreeMap<String, ResourceOverride>,
    ) -> Result<Self> {
        let mut all_rules = rules::expand_overrides(overrides)?;
        all_rules.extend(ignore);

        let mut patches = Vec::new();
        for rule in &all_rules {
            for path in &rule.field_paths {
                patches.push(NormalizerPatch {
                    group_kind: GroupKind::new(rule.group.as_str(), rule.kind.as_str()),
                    name: rule.name.clone(),
                    namespace: rule.namespace.clone(),
                    patch: RemovePatch::compile(path)?,
                });
            }
        }
        tracing::debug!(
            component = module_path!(),
            op = "compile_rules",
            rules = all_rules.len(),
            patches = patches.len(),
        );
        Ok(Self { patches })
    }

    /// Apply all matching removals to a staged document
    fn apply_matched(&self, matched: &[&NormalizerPatch], doc: &mut Value) -> Result<()> {
        for entry in matched {
            match entry.patch.apply(doc) {
                Ok(()) => {}
                Err(PatchError::PathAbsent { .. }) => {
                    tracing::trace!(
                        component = module_path!(),
                        op = "normalize",
                        pointer = entry.patch.pointer().as_str(),
                        "path absent, skipping removal"
                    );
                }
                Err(e) => {
                    return Err(NormalizeError::Apply {
                        pointer: entry.patch.pointer().as_str().to_string(),
                        message: e.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}

impl Normalizer for DiffNormalizer {
    fn normalize(&self, resource: &mut Unstructured) -> Result<()> {
        let matched: Vec<&NormalizerPatch> =
            self.patches.iter().filter(|p| p.matches(resource)).collect();

        // Fast path: nothing to remove, no serialization round-trip
        if matched.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            component = module_path!(),
            op = "normalize",
            kind = resource.kind(),
            name = resource.name(),
            matched = matched.len(),
        );

        let bytes = resource.to_document()?;
        let mut doc: Value =
            serde_json::from_slice(&bytes).map_err(|e| NormalizeError::Serialize {
                message: e.to_string(),
            })?;

        self.apply_matched(&matched, &mut doc)?;

        let normalized = serde_json::to_vec(&doc).map_err(|e| NormalizeError::Serialize {
            message: e.to_string(),
        })?;
        resource.replace_from_document(&normalized)
    }
}

/// Normalizer that leaves every resource untouched
///
/// Callers without ignore configuration still hand the diff engine a
/// normalizer; this is that normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNormalizer;

impl Normalizer for NoopNormalizer {
    fn normalize(&self, _resource: &mut Unstructured) -> Result<()> {
        Ok(())
    }
}
