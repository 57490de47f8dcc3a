//! Error types for SCV Core
//!
//! Provides error handling for:
//! - Resource property validation (product id, guidance, action)
//! - Catalog entries whose names do not carry a semantic version
//! - Selection over an empty artifact set

/// Main error type for the versioning pipeline
#[derive(Debug, thiserror::Error)]
pub enum VersioningError {
    /// Input failed validation
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Artifact selection failed
    #[error("selection failed: {0}")]
    Selection(#[from] SelectionError),
}

impl VersioningError {
    /// Check if error was caused by caller-supplied input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Input validation errors
///
/// All variants are fatal for the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// `ProductId` property absent or not a string
    #[error("missing product id")]
    MissingProductId,

    /// Product id does not match the catalog id format
    #[error("invalid product id: {0:?} (expected prod- followed by 13 alphanumeric characters)")]
    InvalidProductId(String),

    /// Guidance outside DEFAULT | DEPRECATED
    #[error("invalid guidance: {0:?} (expected DEFAULT or DEPRECATED)")]
    InvalidGuidance(String),

    /// Action outside ALL | ALL_EXCEPT_LATEST
    #[error("invalid action: {0:?} (expected ALL or ALL_EXCEPT_LATEST)")]
    InvalidAction(String),

    /// Artifact summary name is not a marker plus a semantic version
    #[error("invalid semantic version {version:?} in artifact {artifact_id} (name {name:?}): {source}")]
    InvalidVersion {
        /// Provisioning artifact id
        artifact_id: String,
        /// Summary name as returned by the catalog
        name: String,
        /// Name with the marker character stripped
        version: String,
        /// Parser error
        #[source]
        source: semver::Error,
    },
}

/// Artifact selection errors
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// Latest artifact requested from an empty set
    #[error("cannot select latest artifact from an empty set")]
    EmptyInput,
}

/// Result alias for core operations
pub type Result<T, E = VersioningError> = std::result::Result<T, E>;
