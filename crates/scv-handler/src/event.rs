//! CloudFormation custom-resource request and response documents

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CloudFormation caps the whole response body at 4096 bytes
const MAX_REASON_LEN: usize = 1024;

/// Lifecycle operation requested by CloudFormation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    /// Resource created with the stack
    Create,
    /// Resource properties changed
    Update,
    /// Resource removed from the stack
    Delete,
}

/// Custom-resource request event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    /// Create, Update or Delete
    pub request_type: RequestType,
    /// Pre-signed URL the response must be PUT to
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    /// Stack ARN
    pub stack_id: String,
    /// Unique request id
    pub request_id: String,
    /// Template resource type, e.g. `Custom::ProductVersions`
    pub resource_type: String,
    /// Template logical id
    pub logical_resource_id: String,
    /// Physical id from a previous response (Update and Delete only)
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    /// Template properties
    #[serde(default)]
    pub resource_properties: Map<String, Value>,
    /// Previous properties (Update only)
    #[serde(default)]
    pub old_resource_properties: Option<Map<String, Value>>,
    /// ARN of the function serving the resource
    #[serde(default)]
    pub service_token: Option<String>,
}

/// Outcome reported to CloudFormation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    /// Operation succeeded
    Success,
    /// Operation failed; `Reason` explains why
    Failed,
}

/// Custom-resource response document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    /// SUCCESS or FAILED
    pub status: ResponseStatus,
    /// Failure explanation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Physical id of the resource
    pub physical_resource_id: String,
    /// Echoed from the request
    pub stack_id: String,
    /// Echoed from the request
    pub request_id: String,
    /// Echoed from the request
    pub logical_resource_id: String,
    /// Whether `Data` is masked in the console
    #[serde(default)]
    pub no_echo: bool,
    /// Attributes available through `Fn::GetAtt`
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl CustomResourceResponse {
    /// Successful response carrying `data`
    #[must_use]
    pub fn success(
        event: &CustomResourceEvent,
        physical_resource_id: impl Into<String>,
        data: Map<String, Value>,
    ) -> Self {
        Self {
            status: ResponseStatus::Success,
            reason: None,
            physical_resource_id: physical_resource_id.into(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data,
        }
    }

    /// Failed response with a reason
    #[must_use]
    pub fn failed(
        event: &CustomResourceEvent,
        physical_resource_id: impl Into<String>,
        reason: &str,
    ) -> Self {
        Self {
            status: ResponseStatus::Failed,
            reason: Some(truncate(reason, MAX_REASON_LEN).to_string()),
            physical_resource_id: physical_resource_id.into(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            no_echo: false,
            data: Map::new(),
        }
    }

    /// Check if the response reports success
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_event() -> Value {
        json!({
            "RequestType": "Create",
            "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:scv-handler",
            "ResponseURL": "https://cloudformation-custom-resource-response-useast1.s3.amazonaws.com/abc",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/catalog/guid",
            "RequestId": "5d478078-13e9-baf0-464a-7ef285ecc786",
            "LogicalResourceId": "ProductVersions",
            "ResourceType": "Custom::ProductVersions",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:scv-handler",
                "ProductId": "prod-vorrf6jrm57si",
                "Action": "ALL_EXCEPT_LATEST"
            }
        })
    }

    #[test]
    fn deserializes_create_event() {
        let event: CustomResourceEvent = serde_json::from_value(create_event()).unwrap();
        assert_eq!(event.request_type, RequestType::Create);
        assert!(event.physical_resource_id.is_none());
        assert_eq!(event.resource_properties["ProductId"], "prod-vorrf6jrm57si");
        assert!(event.response_url.starts_with("https://"));
    }

    #[test]
    fn rejects_unknown_request_type() {
        let mut raw = create_event();
        raw["RequestType"] = json!("Replace");
        assert!(serde_json::from_value::<CustomResourceEvent>(raw).is_err());
    }

    #[test]
    fn success_serializes_cloudformation_shape() {
        let event: CustomResourceEvent = serde_json::from_value(create_event()).unwrap();
        let mut data = Map::new();
        data.insert("UpdatedCount".into(), json!("4"));

        let body = serde_json::to_value(CustomResourceResponse::success(&event, "prod-vorrf6jrm57si", data)).unwrap();
        assert_eq!(body["Status"], "SUCCESS");
        assert_eq!(body["PhysicalResourceId"], "prod-vorrf6jrm57si");
        assert_eq!(body["LogicalResourceId"], "ProductVersions");
        assert_eq!(body["NoEcho"], false);
        assert_eq!(body["Data"]["UpdatedCount"], "4");
        assert!(body.get("Reason").is_none());
    }

    #[test]
    fn failed_carries_truncated_reason() {
        let event: CustomResourceEvent = serde_json::from_value(create_event()).unwrap();
        let long = "é".repeat(MAX_REASON_LEN);
        let response = CustomResourceResponse::failed(&event, "ProductVersions", &long);

        let reason = response.reason.as_deref().unwrap();
        assert!(reason.len() <= MAX_REASON_LEN);
        assert!(!response.is_success());

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["Status"], "FAILED");
        assert!(body.get("Data").is_none());
    }
}
