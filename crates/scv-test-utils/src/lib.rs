//! Testing utilities for SCV workspace
//!
//! Shared fixtures, an in-memory catalog and property helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use scv_catalog::{ArtifactUpdate, CatalogError, CatalogGateway};
use scv_core::{ArtifactRecord, ProductDescription, ProductId};
use std::collections::HashMap;

/// `DescribeProductAsAdmin` dump of a product with five versions
pub const DESCRIBE_PRODUCT_JSON: &str = include_str!("../fixtures/describe_product.json");

/// Product id used by the fixture
pub const FIXTURE_PRODUCT_ID: &str = "prod-vorrf6jrm57si";

/// Artifact ids of the fixture, in service order
pub const FIXTURE_ARTIFACT_IDS: [&str; 5] = [
    "pa-mwv4usw5laf7s",
    "pa-psujhj3yglxmg",
    "pa-nas2v5nrgcbua",
    "pa-ys2nqzbpg2hbw",
    "pa-wywm54o3dnehu",
];

/// Fixture artifact carrying v1.1.14
pub const FIXTURE_LATEST_ID: &str = "pa-ys2nqzbpg2hbw";

pub fn describe_product_fixture() -> ProductDescription {
    serde_json::from_str(DESCRIBE_PRODUCT_JSON).unwrap()
}

pub fn fixture_product_id() -> ProductId {
    FIXTURE_PRODUCT_ID.parse().unwrap()
}

pub fn fixture_records() -> Vec<ArtifactRecord> {
    scv_core::normalize(&describe_product_fixture()).unwrap()
}

/// Catalog held in memory, recording every update it receives
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Mutex<HashMap<String, ProductDescription>>,
    updates: Mutex<Vec<ArtifactUpdate>>,
    describe_calls: Mutex<usize>,
    fail_update_on: Mutex<Option<String>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the fixture product
    pub fn with_fixture() -> Self {
        let catalog = Self::new();
        catalog.insert(describe_product_fixture());
        catalog
    }

    pub fn insert(&self, description: ProductDescription) {
        self.products
            .lock()
            .insert(description.product_id().to_string(), description);
    }

    /// Make updates of `artifact_id` fail with a service error
    pub fn fail_update_on(&self, artifact_id: impl Into<String>) {
        *self.fail_update_on.lock() = Some(artifact_id.into());
    }

    pub fn updates(&self) -> Vec<ArtifactUpdate> {
        self.updates.lock().clone()
    }

    pub fn updated_ids(&self) -> Vec<String> {
        self.updates
            .lock()
            .iter()
            .map(|u| u.artifact_id.clone())
            .collect()
    }

    pub fn describe_calls(&self) -> usize {
        *self.describe_calls.lock()
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalog {
    async fn describe_product_as_admin(
        &self,
        product_id: &ProductId,
    ) -> Result<ProductDescription, CatalogError> {
        *self.describe_calls.lock() += 1;
        self.products
            .lock()
            .get(product_id.as_str())
            .cloned()
            .ok_or_else(|| CatalogError::Describe {
                product_id: product_id.to_string(),
                message: "ResourceNotFoundException: product not found".to_string(),
            })
    }

    async fn update_provisioning_artifact(&self, update: &ArtifactUpdate) -> Result<(), CatalogError> {
        if self.fail_update_on.lock().as_deref() == Some(update.artifact_id.as_str()) {
            return Err(CatalogError::Update {
                product_id: update.product_id.to_string(),
                artifact_id: update.artifact_id.clone(),
                message: "ThrottlingException: rate exceeded".to_string(),
            });
        }
        self.updates.lock().push(update.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scv_core::Guidance;

    #[test]
    fn fixture_normalizes() {
        let records = fixture_records();
        let ids: Vec<&str> = records.iter().map(|r| r.artifact_id.as_str()).collect();
        assert_eq!(ids, FIXTURE_ARTIFACT_IDS);
    }

    #[tokio::test]
    async fn in_memory_catalog_records_and_fails() {
        let catalog = InMemoryCatalog::with_fixture();
        catalog.fail_update_on("pa-bad");

        let desc = catalog
            .describe_product_as_admin(&fixture_product_id())
            .await
            .unwrap();
        assert_eq!(desc.product_id(), FIXTURE_PRODUCT_ID);

        let ok = ArtifactUpdate::new(fixture_product_id(), "pa-good", true, Guidance::Default);
        let bad = ArtifactUpdate::new(fixture_product_id(), "pa-bad", true, Guidance::Default);
        catalog.update_provisioning_artifact(&ok).await.unwrap();
        assert!(catalog.update_provisioning_artifact(&bad).await.is_err());

        assert_eq!(catalog.updated_ids(), ["pa-good"]);
        assert_eq!(catalog.describe_calls(), 1);
    }

    #[tokio::test]
    async fn unknown_product_is_a_describe_error() {
        let catalog = InMemoryCatalog::new();
        let err = catalog
            .describe_product_as_admin(&"prod-abcdef1234567".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Describe { .. }));
    }
}
