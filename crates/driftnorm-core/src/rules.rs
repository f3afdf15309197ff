//! Ignore rules and per-type overrides
//!
//! An ignore rule names a scope (resource type, optional instance
//! name/namespace) and the field paths excluded from drift comparison.
//! Overrides are type-level settings records keyed by `"group/kind"`; they
//! may embed further ignore paths as raw YAML configuration text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{NormalizeError, Result};
use driftnorm_core_types::GroupKind;

/// One configured ignore rule
///
/// Empty `name`/`namespace` means the rule applies to every instance of the
/// type. Field paths are kept in configuration order; each expands into its
/// own compiled removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IgnoreDifference {
    #[serde(default)]
    pub group: String,
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub field_paths: Vec<String>,
}

/// Per-type settings override
///
/// `ignore_differences` carries raw YAML text with the embedded schema
/// `{fieldPaths: [...]}`; empty text contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOverride {
    #[serde(default)]
    pub ignore_differences: String,
}

/// Fixed deserialization target for override configuration text
///
/// Unknown fields in the text are tolerated; only `fieldPaths` is read.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OverrideIgnoreDiff {
    #[serde(default)]
    field_paths: Vec<String>,
}

/// Expand override records into type-level ignore rules
///
/// Entries whose key does not split into at least `"group/kind"` are
/// skipped silently. Entries with empty configuration text contribute no
/// rule. The `BTreeMap` keying makes expansion order deterministic:
/// lexicographic by override key.
///
/// # Errors
///
/// Returns `ConfigParse` when an entry's configuration text is present but
/// fails to deserialize; expansion aborts at the first failure.
pub fn expand_overrides(
    overrides: &BTreeMap<String, ResourceOverride>,
) -> Result<Vec<IgnoreDifference>> {
    let mut rules = Vec::new();
    for (key, record) in overrides {
        let Some(group_kind) = GroupKind::parse_override_key(key) else {
            tracing::debug!(
                component = module_path!(),
                key = %key,
                "skipping unrecognized override key"
            );
            continue;
        };
        if record.ignore_differences.is_empty() {
            continue;
        }
        let settings: OverrideIgnoreDiff = serde_yaml::from_str(&record.ignore_differences)
            .map_err(|e| NormalizeError::ConfigParse {
                key: key.clone(),
                message: e.to_string(),
            })?;
        rules.push(IgnoreDifference {
            group: group_kind.group().to_string(),
            kind: group_kind.kind().to_string(),
            field_paths: settings.field_paths,
            ..IgnoreDifference::default()
        });
    }
    Ok(rules)
}
