//! Custom-resource lifecycle handling
//!
//! Create and Update run the versioner with the event's properties. Delete
//! leaves the catalog alone. Whatever happens, exactly one response is sent
//! to the event's `ResponseURL`.

use crate::error::HandlerError;
use crate::event::{CustomResourceEvent, CustomResourceResponse, RequestType};
use crate::response::ResponseSender;
use crate::versioner::ArtifactVersioner;
use scv_catalog::CatalogGateway;
use scv_core::properties::{resolve_product_id, PRODUCT_ID};
use scv_core::{UpdateConfig, UpdateOutcome};
use serde_json::{Map, Value};

/// Handles custom-resource events end to end
#[derive(Debug)]
pub struct CustomResourceHandler<G, S> {
    versioner: ArtifactVersioner<G>,
    sender: S,
}

impl<G: CatalogGateway, S: ResponseSender> CustomResourceHandler<G, S> {
    /// Create handler over a catalog gateway and a response sender
    #[inline]
    #[must_use]
    pub fn new(gateway: G, sender: S) -> Self {
        Self {
            versioner: ArtifactVersioner::new(gateway),
            sender,
        }
    }

    /// Handle a raw Lambda payload
    ///
    /// # Errors
    /// The payload is not a custom-resource event, or the response could not
    /// be delivered.
    pub async fn handle_value(&self, payload: Value) -> Result<Value, HandlerError> {
        let event: CustomResourceEvent = serde_json::from_value(payload)?;
        let response = self.handle(&event).await?;
        serde_json::to_value(response).map_err(HandlerError::Encode)
    }

    /// Handle one event and deliver the response
    ///
    /// # Errors
    /// Only delivery failures; processing failures become FAILED responses.
    pub async fn handle(&self, event: &CustomResourceEvent) -> Result<CustomResourceResponse, HandlerError> {
        tracing::info!(
            request_type = ?event.request_type,
            request_id = %event.request_id,
            logical_resource_id = %event.logical_resource_id,
            stack_id = %event.stack_id,
            "received custom resource event"
        );
        tracing::debug!(properties = ?event.resource_properties, "resource properties");

        let response = self.respond(event).await;
        self.sender.send(&event.response_url, &response).await?;
        Ok(response)
    }

    async fn respond(&self, event: &CustomResourceEvent) -> CustomResourceResponse {
        let physical_id = physical_resource_id(event);

        match event.request_type {
            RequestType::Delete => {
                tracing::info!(physical_resource_id = %physical_id, "delete requested, leaving catalog unchanged");
                CustomResourceResponse::success(event, physical_id, Map::new())
            }
            RequestType::Create | RequestType::Update => match self.create_or_update(event).await {
                Ok(outcome) => {
                    tracing::info!(
                        product_id = %outcome.product_id,
                        updated = outcome.updated_count(),
                        "provisioning artifacts versioned"
                    );
                    CustomResourceResponse::success(event, physical_id, outcome_data(&outcome))
                }
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        validation = e.is_validation(),
                        malformed = e.is_malformed(),
                        artifact_id = e.artifact_id(),
                        "custom resource request failed"
                    );
                    CustomResourceResponse::failed(event, physical_id, &e.to_string())
                }
            },
        }
    }

    async fn create_or_update(&self, event: &CustomResourceEvent) -> Result<UpdateOutcome, HandlerError> {
        let config = UpdateConfig::from_properties(&event.resource_properties)?;
        self.versioner.apply(&config).await
    }
}

/// Existing id, else the product id, else one derived from the request
fn physical_resource_id(event: &CustomResourceEvent) -> String {
    if let Some(id) = event.physical_resource_id.as_deref().filter(|id| !id.is_empty()) {
        return id.to_string();
    }
    if let Ok(product_id) = resolve_product_id(event.resource_properties.get(PRODUCT_ID)) {
        return product_id.to_string();
    }
    format!("{}-{}", event.logical_resource_id, event.request_id)
}

/// `Fn::GetAtt` attributes; CloudFormation reads them as strings
fn outcome_data(outcome: &UpdateOutcome) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert("ProductId".into(), Value::String(outcome.product_id.clone()));
    data.insert("Action".into(), Value::String(outcome.action.to_string()));
    if let Some(latest) = &outcome.latest_artifact_id {
        data.insert("LatestArtifactId".into(), Value::String(latest.clone()));
    }
    data.insert("UpdatedArtifactIds".into(), Value::String(outcome.updated.join(",")));
    data.insert("UpdatedCount".into(), Value::String(outcome.updated_count().to_string()));
    data.insert("SkippedArtifactIds".into(), Value::String(outcome.skipped.join(",")));
    data
}
