//! Artifact versioner
//!
//! Runs the versioning pipeline against a catalog:
//! 1. Describe the product
//! 2. Normalize its artifact summaries
//! 3. Select the artifacts the action applies to
//! 4. Update each selected artifact, one call at a time
//!
//! The first failing update aborts the rest. Updates applied before the
//! failure are not rolled back.

use crate::error::HandlerError;
use scv_catalog::{ArtifactUpdate, CatalogGateway};
use scv_core::{
    latest, normalize, select_for_update, Action, ArtifactRecord, ProductDescription, UpdateConfig,
    UpdateOutcome,
};

/// Artifacts a run would update, before any write happens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Product the plan is for
    pub product_id: String,
    /// Policy the plan was built with
    pub action: Action,
    /// Highest version, when the policy needed it
    pub latest: Option<ArtifactRecord>,
    /// Artifacts to update, in update order
    pub selected: Vec<ArtifactRecord>,
    /// Artifacts left alone
    pub skipped: Vec<ArtifactRecord>,
}

impl UpdatePlan {
    /// Build a plan from a product description without touching the catalog
    ///
    /// # Errors
    /// Invalid artifact versions, or `ALL_EXCEPT_LATEST` on a product without
    /// artifacts.
    pub fn build(description: &ProductDescription, action: Action) -> Result<Self, HandlerError> {
        let records = normalize(description)?;

        let latest_record = if action.requires_latest() {
            Some(latest(&records)?.clone())
        } else {
            None
        };

        let selected: Vec<ArtifactRecord> = select_for_update(&records, action)?
            .into_iter()
            .cloned()
            .collect();
        let skipped = records
            .into_iter()
            .filter(|r| !selected.iter().any(|s| s.artifact_id == r.artifact_id))
            .collect();

        Ok(Self {
            product_id: description.product_id().to_string(),
            action,
            latest: latest_record,
            selected,
            skipped,
        })
    }

    /// Ids of the artifacts to update
    #[must_use]
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.iter().map(|r| r.artifact_id.clone()).collect()
    }

    /// Outcome reported when every selected artifact was updated
    #[must_use]
    pub fn into_outcome(self) -> UpdateOutcome {
        UpdateOutcome {
            updated: self.selected_ids(),
            skipped: self.skipped.into_iter().map(|r| r.artifact_id).collect(),
            latest_artifact_id: self.latest.map(|r| r.artifact_id),
            product_id: self.product_id,
            action: self.action,
        }
    }
}

/// Applies update policies to a product's provisioning artifacts
#[derive(Debug)]
pub struct ArtifactVersioner<G> {
    gateway: G,
}

impl<G: CatalogGateway> ArtifactVersioner<G> {
    /// Create versioner over a catalog gateway
    #[inline]
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Describe the product and compute what `apply` would update
    pub async fn plan(&self, config: &UpdateConfig) -> Result<UpdatePlan, HandlerError> {
        let description = self
            .gateway
            .describe_product_as_admin(&config.product_id)
            .await?;
        tracing::debug!(
            product_id = %config.product_id,
            summaries = description.provisioning_artifact_summaries.len(),
            "described product"
        );

        let plan = UpdatePlan::build(&description, config.action)?;
        tracing::info!(
            product_id = %config.product_id,
            action = %config.action,
            latest = plan.latest.as_ref().map(|r| r.artifact_id.as_str()),
            selected = ?plan.selected_ids(),
            "planned provisioning artifact updates"
        );
        Ok(plan)
    }

    /// Update the selected artifacts' active flag and guidance
    ///
    /// # Errors
    /// Fails on the first error; artifacts updated before it stay updated.
    pub async fn apply(&self, config: &UpdateConfig) -> Result<UpdateOutcome, HandlerError> {
        let plan = self.plan(config).await?;

        for (applied, record) in plan.selected.iter().enumerate() {
            let update = ArtifactUpdate::new(
                config.product_id.clone(),
                record.artifact_id.as_str(),
                config.active,
                config.guidance,
            );

            if let Err(e) = self.gateway.update_provisioning_artifact(&update).await {
                tracing::error!(
                    product_id = %config.product_id,
                    artifact_id = %record.artifact_id,
                    applied,
                    remaining = plan.selected.len() - applied - 1,
                    error = %e,
                    "provisioning artifact update failed, aborting remaining updates"
                );
                return Err(e.into());
            }

            tracing::info!(
                artifact_id = %record.artifact_id,
                version = %record.version,
                active = config.active,
                guidance = %config.guidance,
                "updated provisioning artifact"
            );
        }

        Ok(plan.into_outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scv_catalog::{CatalogError, MockCatalogGateway};
    use scv_core::{Guidance, ProvisioningArtifactSummary};

    fn config(action: Action) -> UpdateConfig {
        UpdateConfig::new("prod-abcdef1234567".parse().unwrap())
            .with_active(false)
            .with_guidance(Guidance::Deprecated)
            .with_action(action)
    }

    fn description() -> ProductDescription {
        ProductDescription::new(
            "prod-abcdef1234567",
            vec![
                ProvisioningArtifactSummary::new("pa-a", "v1.0.0", "first"),
                ProvisioningArtifactSummary::new("pa-b", "v2.0.0", "second"),
                ProvisioningArtifactSummary::new("pa-c", "v1.5.0", "third"),
            ],
        )
    }

    #[test]
    fn plan_build_all_except_latest() {
        let plan = UpdatePlan::build(&description(), Action::AllExceptLatest).unwrap();
        assert_eq!(plan.latest.as_ref().unwrap().artifact_id, "pa-b");
        assert_eq!(plan.selected_ids(), ["pa-a", "pa-c"]);
        assert_eq!(plan.skipped.len(), 1);

        let outcome = plan.into_outcome();
        assert_eq!(outcome.latest_artifact_id.as_deref(), Some("pa-b"));
        assert_eq!(outcome.skipped, ["pa-b"]);
        assert_eq!(outcome.updated_count(), 2);
    }

    #[test]
    fn plan_build_all_does_not_compute_latest() {
        let plan = UpdatePlan::build(&description(), Action::All).unwrap();
        assert!(plan.latest.is_none());
        assert_eq!(plan.selected_ids(), ["pa-a", "pa-b", "pa-c"]);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn plan_build_empty_product() {
        let empty = ProductDescription::new("prod-abcdef1234567", vec![]);
        assert!(UpdatePlan::build(&empty, Action::All).unwrap().selected.is_empty());

        let err = UpdatePlan::build(&empty, Action::AllExceptLatest).unwrap_err();
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn apply_updates_selected_in_order() {
        let mut mock = MockCatalogGateway::new();
        mock.expect_describe_product_as_admin()
            .times(1)
            .returning(|_| Ok(description()));

        let mut seq = mockall::Sequence::new();
        for id in ["pa-a", "pa-c"] {
            mock.expect_update_provisioning_artifact()
                .withf(move |u| {
                    u.artifact_id == id && !u.active && u.guidance == Guidance::Deprecated
                })
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let versioner = ArtifactVersioner::new(mock);
        let outcome = versioner.apply(&config(Action::AllExceptLatest)).await.unwrap();
        assert_eq!(outcome.updated, ["pa-a", "pa-c"]);
    }

    #[tokio::test]
    async fn apply_stops_at_first_failure() {
        let mut mock = MockCatalogGateway::new();
        mock.expect_describe_product_as_admin()
            .returning(|_| Ok(description()));
        mock.expect_update_provisioning_artifact()
            .withf(|u| u.artifact_id == "pa-a")
            .times(1)
            .returning(|u| {
                Err(CatalogError::Update {
                    product_id: u.product_id.to_string(),
                    artifact_id: u.artifact_id.clone(),
                    message: "AccessDenied".into(),
                })
            });
        // pa-b and pa-c must never be attempted
        mock.expect_update_provisioning_artifact().times(0);

        let versioner = ArtifactVersioner::new(mock);
        let err = versioner.apply(&config(Action::All)).await.unwrap_err();
        assert!(matches!(err, HandlerError::Catalog(CatalogError::Update { .. })));
    }

    #[tokio::test]
    async fn describe_failure_skips_updates() {
        let mut mock = MockCatalogGateway::new();
        mock.expect_describe_product_as_admin().returning(|id| {
            Err(CatalogError::Describe {
                product_id: id.to_string(),
                message: "ResourceNotFoundException".into(),
            })
        });
        mock.expect_update_provisioning_artifact().times(0);

        let versioner = ArtifactVersioner::new(mock);
        assert!(versioner.apply(&config(Action::All)).await.is_err());
    }
}
