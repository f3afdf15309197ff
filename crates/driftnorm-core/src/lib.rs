//! driftnorm Core - Diff normalization for declarative continuous delivery
//!
//! In declarative delivery, a live resource's observed state is compared
//! against its desired state to detect drift. Fields injected by
//! controllers, defaulting webhooks, and autoscalers must be excluded from
//! that comparison or the system reports perpetual, meaningless diffs.
//!
//! This crate provides:
//! - Ignore rule and per-type override models ([`rules`])
//! - A rule compiler producing an immutable set of scoped field removals
//!   ([`DiffNormalizer::new`])
//! - Tolerant removal application: absent paths are no-ops, everything else
//!   either fully commits or leaves the resource untouched ([`normalizer`])
//! - The [`Unstructured`] resource document the normalizer operates on
//! - Error and logging facilities shared with the surrounding application

pub mod errors;
pub mod logging_facility;
pub mod normalizer;
pub mod patch;
pub mod pointer;
pub mod resource;
pub mod rules;

// Re-export commonly used types
pub use errors::{NormalizeError, NormalizeErrorKind, Result};
pub use normalizer::{DiffNormalizer, NoopNormalizer, Normalizer};
pub use resource::Unstructured;
pub use rules::{IgnoreDifference, ResourceOverride};
