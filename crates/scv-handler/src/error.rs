//! Error types for the custom-resource handler

use scv_catalog::CatalogError;
use scv_core::{SelectionError, ValidationError, VersioningError};

/// Handler error type
///
/// Everything except `InvalidEvent`, `Encode` and `ResponseDelivery` is
/// reported back to CloudFormation as a FAILED response; those are returned
/// to the Lambda runtime.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Versioning pipeline rejected input or selection
    #[error(transparent)]
    Versioning(#[from] VersioningError),

    /// Catalog call failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Event payload did not deserialize
    #[error("invalid custom resource event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    /// Response document did not serialize
    #[error("response encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response could not be delivered to the pre-signed URL
    #[error("response delivery failed: {0}")]
    ResponseDelivery(String),

    /// Runtime settings invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl HandlerError {
    /// Check if the invocation failed on caller input
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Versioning(e) if e.is_validation())
    }

    /// Check if the catalog answered with something unusable
    #[inline]
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Catalog(e) if e.is_malformed())
    }

    /// Artifact whose update failed, if any
    #[inline]
    #[must_use]
    pub fn artifact_id(&self) -> Option<&str> {
        match self {
            Self::Catalog(e) => e.artifact_id(),
            _ => None,
        }
    }
}

impl From<ValidationError> for HandlerError {
    fn from(e: ValidationError) -> Self {
        Self::Versioning(e.into())
    }
}

impl From<SelectionError> for HandlerError {
    fn from(e: SelectionError) -> Self {
        Self::Versioning(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_classified() {
        let err: HandlerError = ValidationError::MissingProductId.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "validation failed: missing product id");
    }

    #[test]
    fn catalog_error_is_transparent() {
        let err: HandlerError = CatalogError::MalformedResponse("no product".into()).into();
        assert!(!err.is_validation());
        assert!(err.is_malformed());
        assert_eq!(err.artifact_id(), None);
        assert_eq!(err.to_string(), "malformed catalog response: no product");
    }

    #[test]
    fn update_failure_names_artifact() {
        let err: HandlerError = CatalogError::Update {
            product_id: "prod-abcdef1234567".into(),
            artifact_id: "pa-nas2v5nrgcbua".into(),
            message: "ThrottlingException".into(),
        }
        .into();
        assert!(!err.is_malformed());
        assert_eq!(err.artifact_id(), Some("pa-nas2v5nrgcbua"));
    }

    #[test]
    fn encode_failure_is_not_an_event_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = HandlerError::Encode(source);
        assert!(!matches!(err, HandlerError::InvalidEvent(_)));
        assert!(err.to_string().starts_with("response encoding failed"));
    }
}
