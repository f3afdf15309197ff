use thiserror::Error;

/// Result type alias using NormalizeError
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeErrorKind {
    // Compile-time (normalizer construction)
    ConfigParse,
    PatchBuild,

    // Per-call
    Apply,
    Serialize,
    Deserialize,
}

impl NormalizeErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeErrorKind::ConfigParse => "ERR_CONFIG_PARSE",
            NormalizeErrorKind::PatchBuild => "ERR_PATCH_BUILD",
            NormalizeErrorKind::Apply => "ERR_APPLY",
            NormalizeErrorKind::Serialize => "ERR_SERIALIZE",
            NormalizeErrorKind::Deserialize => "ERR_DESERIALIZE",
        }
    }
}

/// Error taxonomy for normalizer construction and normalization calls
///
/// Construction errors (`ConfigParse`, `PatchBuild`) are fatal: no normalizer
/// is produced. Call errors leave the resource exactly as it was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Override configuration text failed to deserialize
    #[error("Override configuration for '{key}' failed to parse: {message}")]
    ConfigParse { key: String, message: String },

    /// A field path could not be compiled into a removal patch
    #[error("Cannot compile removal patch for '{pointer}': {message}")]
    PatchBuild { pointer: String, message: String },

    /// Patch application failed for a reason other than "path absent"
    #[error("Removal at '{pointer}' failed to apply: {message}")]
    Apply { pointer: String, message: String },

    /// Resource could not serialize to document form
    #[error("Resource failed to serialize to document form: {message}")]
    Serialize { message: String },

    /// Normalized document could not deserialize back into the resource
    #[error("Normalized document failed to deserialize into the resource: {message}")]
    Deserialize { message: String },
}

impl NormalizeError {
    /// Get the error kind
    pub fn kind(&self) -> NormalizeErrorKind {
        match self {
            NormalizeError::ConfigParse { .. } => NormalizeErrorKind::ConfigParse,
            NormalizeError::PatchBuild { .. } => NormalizeErrorKind::PatchBuild,
            NormalizeError::Apply { .. } => NormalizeErrorKind::Apply,
            NormalizeError::Serialize { .. } => NormalizeErrorKind::Serialize,
            NormalizeError::Deserialize { .. } => NormalizeErrorKind::Deserialize,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}
