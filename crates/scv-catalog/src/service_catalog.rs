//! AWS Service Catalog implementation of [`CatalogGateway`]

use crate::error::CatalogError;
use crate::gateway::{ArtifactUpdate, CatalogGateway};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_servicecatalog::error::DisplayErrorContext;
use aws_sdk_servicecatalog::operation::describe_product_as_admin::DescribeProductAsAdminOutput;
use aws_sdk_servicecatalog::types::ProvisioningArtifactGuidance;
use aws_sdk_servicecatalog::Client;
use scv_core::{Guidance, ProductDescription, ProductId, ProvisioningArtifactSummary};

/// Gateway backed by the Service Catalog API
#[derive(Debug, Clone)]
pub struct ServiceCatalogGateway {
    client: Client,
}

impl ServiceCatalogGateway {
    /// Wrap an existing client
    #[inline]
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration
    ///
    /// Region and credentials come from the standard provider chain (the
    /// Lambda environment when deployed).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl CatalogGateway for ServiceCatalogGateway {
    async fn describe_product_as_admin(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductDescription, CatalogError> {
        tracing::debug!(product_id = %product_id, "describing product");

        let output = self
            .client
            .describe_product_as_admin()
            .id(product_id.as_str())
            .send()
            .await
            .map_err(|e| CatalogError::Describe {
                product_id: product_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        product_description_from_output(&output)
    }

    async fn update_provisioning_artifact(&self, update: &ArtifactUpdate) -> Result<(), CatalogError> {
        tracing::debug!(
            product_id = %update.product_id,
            artifact_id = %update.artifact_id,
            active = update.active,
            guidance = %update.guidance,
            "updating provisioning artifact"
        );

        self.client
            .update_provisioning_artifact()
            .product_id(update.product_id.as_str())
            .provisioning_artifact_id(&update.artifact_id)
            .active(update.active)
            .guidance(sdk_guidance(update.guidance))
            .send()
            .await
            .map_err(|e| CatalogError::Update {
                product_id: update.product_id.to_string(),
                artifact_id: update.artifact_id.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

fn sdk_guidance(guidance: Guidance) -> ProvisioningArtifactGuidance {
    match guidance {
        Guidance::Default => ProvisioningArtifactGuidance::Default,
        Guidance::Deprecated => ProvisioningArtifactGuidance::Deprecated,
    }
}

/// Convert the SDK response into the pipeline's description shape
pub(crate) fn product_description_from_output(
    output: &DescribeProductAsAdminOutput,
) -> Result<ProductDescription, CatalogError> {
    let product_id = output
        .product_view_detail()
        .and_then(|detail| detail.product_view_summary())
        .and_then(|summary| summary.product_id())
        .ok_or_else(|| {
            CatalogError::MalformedResponse("missing ProductViewDetail.ProductViewSummary.ProductId".into())
        })?;

    let summaries = output
        .provisioning_artifact_summaries()
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let id = summary.id().ok_or_else(|| {
                CatalogError::MalformedResponse(format!("provisioning artifact summary {i} has no Id"))
            })?;
            let name = summary.name().ok_or_else(|| {
                CatalogError::MalformedResponse(format!("provisioning artifact {id} has no Name"))
            })?;
            Ok(ProvisioningArtifactSummary::new(
                id,
                name,
                summary.description().unwrap_or_default(),
            ))
        })
        .collect::<Result<Vec<_>, CatalogError>>()?;

    Ok(ProductDescription::new(product_id, summaries))
}
