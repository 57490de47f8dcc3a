//! Catalog gateway abstraction
//!
//! The versioning pipeline only needs two catalog operations. Keeping them
//! behind a trait lets tests swap the AWS client for an in-memory catalog
//! or a mock.

use crate::error::CatalogError;
use async_trait::async_trait;
use scv_core::{Guidance, ProductDescription, ProductId};
use std::sync::Arc;

/// One `UpdateProvisioningArtifact` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactUpdate {
    /// Owning product
    pub product_id: ProductId,
    /// Artifact to update
    pub artifact_id: String,
    /// New active flag
    pub active: bool,
    /// New guidance
    pub guidance: Guidance,
}

impl ArtifactUpdate {
    /// Create new update request
    #[inline]
    #[must_use]
    pub fn new(
        product_id: ProductId,
        artifact_id: impl Into<String>,
        active: bool,
        guidance: Guidance,
    ) -> Self {
        Self {
            product_id,
            artifact_id: artifact_id.into(),
            active,
            guidance,
        }
    }
}

/// Operations against the external catalog service
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Describe a product with its provisioning artifact summaries
    async fn describe_product_as_admin(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductDescription, CatalogError>;

    /// Set the active flag and guidance on one provisioning artifact
    async fn update_provisioning_artifact(&self, update: &ArtifactUpdate) -> Result<(), CatalogError>;
}

#[async_trait]
impl<T: CatalogGateway + ?Sized> CatalogGateway for Arc<T> {
    async fn describe_product_as_admin(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductDescription, CatalogError> {
        (**self).describe_product_as_admin(product_id).await
    }

    async fn update_provisioning_artifact(&self, update: &ArtifactUpdate) -> Result<(), CatalogError> {
        (**self).update_provisioning_artifact(update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_id() -> ProductId {
        "prod-abcdef1234567".parse().unwrap()
    }

    #[tokio::test]
    async fn arc_forwards_to_inner_gateway() {
        let mut mock = MockCatalogGateway::new();
        mock.expect_describe_product_as_admin()
            .withf(|id| id.as_str() == "prod-abcdef1234567")
            .times(1)
            .returning(|id| Ok(ProductDescription::new(id.as_str(), vec![])));
        mock.expect_update_provisioning_artifact()
            .withf(|u| u.artifact_id == "pa-1" && !u.active && u.guidance == Guidance::Deprecated)
            .times(1)
            .returning(|_| Ok(()));

        let gateway: Arc<dyn CatalogGateway> = Arc::new(mock);

        let desc = gateway.describe_product_as_admin(&product_id()).await.unwrap();
        assert_eq!(desc.product_id(), "prod-abcdef1234567");

        let update = ArtifactUpdate::new(product_id(), "pa-1", false, Guidance::Deprecated);
        gateway.update_provisioning_artifact(&update).await.unwrap();
    }

    #[tokio::test]
    async fn errors_pass_through_unchanged() {
        let mut mock = MockCatalogGateway::new();
        mock.expect_describe_product_as_admin().returning(|id| {
            Err(CatalogError::Describe {
                product_id: id.to_string(),
                message: "ResourceNotFoundException".to_string(),
            })
        });

        let gateway = Arc::new(mock);
        let err = gateway.describe_product_as_admin(&product_id()).await.unwrap_err();
        assert!(err.to_string().contains("ResourceNotFoundException"));
    }
}
