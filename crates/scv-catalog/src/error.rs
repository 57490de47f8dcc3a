//! Catalog gateway errors

/// Errors raised while talking to the catalog service
///
/// Service errors keep the SDK's full error context in `message`; they are
/// not retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// `DescribeProductAsAdmin` failed
    #[error("describe product {product_id} failed: {message}")]
    Describe {
        /// Product that was described
        product_id: String,
        /// Service error with context
        message: String,
    },

    /// `UpdateProvisioningArtifact` failed
    #[error("update of provisioning artifact {artifact_id} on {product_id} failed: {message}")]
    Update {
        /// Owning product
        product_id: String,
        /// Artifact that was updated
        artifact_id: String,
        /// Service error with context
        message: String,
    },

    /// Response lacked a field the pipeline needs
    #[error("malformed catalog response: {0}")]
    MalformedResponse(String),
}

impl CatalogError {
    /// Check if the service answered with something unusable
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Artifact involved in the failure, if any
    #[inline]
    #[must_use]
    pub fn artifact_id(&self) -> Option<&str> {
        match self {
            Self::Update { artifact_id, .. } => Some(artifact_id),
            _ => None,
        }
    }
}
