//! Delivery of custom-resource responses
//!
//! CloudFormation waits on a pre-signed S3 URL for the response document.
//! The upload must carry an empty `Content-Type`, otherwise the signature
//! check fails.

use crate::error::HandlerError;
use crate::event::CustomResourceResponse;
use async_trait::async_trait;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use std::time::Duration;

/// Sends a response document to CloudFormation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResponseSender: Send + Sync {
    /// Upload `response` to `url`
    async fn send(&self, url: &str, response: &CustomResourceResponse) -> Result<(), HandlerError>;
}

/// `ResponseSender` doing an HTTP PUT
#[derive(Debug, Clone)]
pub struct HttpResponseSender {
    client: reqwest::Client,
}

impl HttpResponseSender {
    /// Create sender with a request timeout
    ///
    /// # Errors
    /// `HandlerError::Config` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, HandlerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HandlerError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResponseSender for HttpResponseSender {
    async fn send(&self, url: &str, response: &CustomResourceResponse) -> Result<(), HandlerError> {
        let body = serde_json::to_vec(response).map_err(HandlerError::Encode)?;
        tracing::debug!(
            status = ?response.status,
            physical_resource_id = %response.physical_resource_id,
            bytes = body.len(),
            "sending custom resource response"
        );

        let reply = self
            .client
            .put(url)
            .header(CONTENT_TYPE, "")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(|e| HandlerError::ResponseDelivery(e.to_string()))?;

        let status = reply.status();
        if !status.is_success() {
            let detail = reply.text().await.unwrap_or_default();
            return Err(HandlerError::ResponseDelivery(format!(
                "response url returned {status}: {detail}"
            )));
        }

        tracing::info!(status = ?response.status, "custom resource response delivered");
        Ok(())
    }
}
