//! Resource property resolution
//!
//! Converts the raw `ResourceProperties` map of a custom-resource event into
//! a typed [`UpdateConfig`]. Each property has its own resolver:
//!
//! | property    | absent        | invalid                   |
//! |-------------|---------------|---------------------------|
//! | `ProductId` | error         | error                     |
//! | `Active`    | `true`        | `true` unless it says false |
//! | `Guidance`  | `DEFAULT`     | error                     |
//! | `Action`    | `ALL`         | error                     |
//!
//! Keys outside this table (CloudFormation always adds `ServiceToken`) are
//! ignored.

use crate::error::ValidationError;
use crate::types::{Action, Guidance, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property key for the product id
pub const PRODUCT_ID: &str = "ProductId";
/// Property key for the active flag
pub const ACTIVE: &str = "Active";
/// Property key for the guidance
pub const GUIDANCE: &str = "Guidance";
/// Property key for the update action
pub const ACTION: &str = "Action";

/// Resolved update policy for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateConfig {
    /// Product whose artifacts are updated
    pub product_id: ProductId,
    /// Value for the artifacts' `Active` flag
    pub active: bool,
    /// Value for the artifacts' `Guidance`
    pub guidance: Guidance,
    /// Which artifacts to update
    pub action: Action,
}

impl UpdateConfig {
    /// Create configuration with documented defaults
    #[inline]
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            active: true,
            guidance: Guidance::default(),
            action: Action::default(),
        }
    }

    /// With active flag
    #[inline]
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// With guidance
    #[inline]
    #[must_use]
    pub fn with_guidance(mut self, guidance: Guidance) -> Self {
        self.guidance = guidance;
        self
    }

    /// With action
    #[inline]
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Resolve configuration from custom-resource properties
    ///
    /// # Errors
    /// Returns the first failing property's `ValidationError`, checked in
    /// the order product id, guidance, action.
    pub fn from_properties(properties: &Map<String, Value>) -> Result<Self, ValidationError> {
        let config = Self {
            product_id: resolve_product_id(properties.get(PRODUCT_ID))?,
            active: resolve_active(properties.get(ACTIVE)),
            guidance: resolve_guidance(properties.get(GUIDANCE))?,
            action: resolve_action(properties.get(ACTION))?,
        };

        tracing::debug!(
            product_id = %config.product_id,
            active = config.active,
            guidance = %config.guidance,
            action = %config.action,
            "resolved resource properties"
        );
        Ok(config)
    }
}

/// Product id must be present, a string and match the catalog format
pub fn resolve_product_id(value: Option<&Value>) -> Result<ProductId, ValidationError> {
    match value {
        Some(Value::String(s)) => s.parse(),
        Some(Value::Null) | None => Err(ValidationError::MissingProductId),
        Some(other) => Err(ValidationError::InvalidProductId(other.to_string())),
    }
}

/// Only an explicit false disables the artifacts
///
/// CloudFormation passes every property as a string, so `"false"` is the
/// usual form; a JSON boolean is accepted too.
#[must_use]
pub fn resolve_active(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.trim().eq_ignore_ascii_case("false"),
        _ => true,
    }
}

/// Guidance defaults to `DEFAULT`; anything else present must be valid
pub fn resolve_guidance(value: Option<&Value>) -> Result<Guidance, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(Guidance::default()),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(ValidationError::InvalidGuidance(other.to_string())),
    }
}

/// Action defaults to `ALL`; anything else present must be valid
pub fn resolve_action(value: Option<&Value>) -> Result<Action, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(Action::default()),
        Some(Value::String(s)) => s.parse(),
        Some(other) => Err(ValidationError::InvalidAction(other.to_string())),
    }
}
