//! Core types for SCV
//!
//! Defines the fundamental types of the versioning pipeline:
//! - Validated catalog identifiers
//! - Guidance and update-action policies
//! - Normalized provisioning artifact records
//! - The catalog's product description shape
//! - The outcome of one versioning run

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static PRODUCT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^prod-[A-Za-z0-9]{13}$").expect("product id pattern compiles"));

/// Service Catalog product identifier (`prod-` + 13 alphanumerics)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if PRODUCT_ID_PATTERN.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::InvalidProductId(s.to_string()))
        }
    }
}

impl TryFrom<String> for ProductId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Guidance shown to end users choosing a product version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Guidance {
    /// No special guidance
    #[default]
    Default,
    /// Version is discouraged
    Deprecated,
}

impl Guidance {
    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Guidance::Default => "DEFAULT",
            Guidance::Deprecated => "DEPRECATED",
        }
    }
}

impl FromStr for Guidance {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(Guidance::Default),
            "DEPRECATED" => Ok(Guidance::Deprecated),
            other => Err(ValidationError::InvalidGuidance(other.to_string())),
        }
    }
}

impl fmt::Display for Guidance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which provisioning artifacts an update applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Every artifact of the product
    #[default]
    All,
    /// Every artifact except the one with the highest version
    AllExceptLatest,
}

impl Action {
    /// Wire representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::All => "ALL",
            Action::AllExceptLatest => "ALL_EXCEPT_LATEST",
        }
    }

    /// Whether the policy needs the latest artifact
    #[inline]
    #[must_use]
    pub fn requires_latest(&self) -> bool {
        matches!(self, Action::AllExceptLatest)
    }
}

impl FromStr for Action {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Action::All),
            "ALL_EXCEPT_LATEST" => Ok(Action::AllExceptLatest),
            other => Err(ValidationError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provisioning artifact of a product, normalized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Owning product
    pub product_id: String,
    /// Provisioning artifact id, unique within the product
    pub artifact_id: String,
    /// Semantic version parsed from the summary name
    pub version: Version,
    /// Free-text description
    pub description: String,
}

impl ArtifactRecord {
    /// Create new record
    #[inline]
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Version,
        description: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            artifact_id: artifact_id.into(),
            version,
            description: description.into(),
        }
    }
}

/// Product description as returned by `DescribeProductAsAdmin`
///
/// Only the fields the pipeline reads are modelled; unknown fields in a
/// service dump are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductDescription {
    /// Product view
    pub product_view_detail: ProductViewDetail,
    /// Artifact summaries in service order
    #[serde(default)]
    pub provisioning_artifact_summaries: Vec<ProvisioningArtifactSummary>,
}

impl ProductDescription {
    /// Create description for a product with the given summaries
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        summaries: Vec<ProvisioningArtifactSummary>,
    ) -> Self {
        Self {
            product_view_detail: ProductViewDetail {
                product_view_summary: ProductViewSummary {
                    product_id: product_id.into(),
                },
            },
            provisioning_artifact_summaries: summaries,
        }
    }

    /// Product id from the view summary
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_view_detail.product_view_summary.product_id
    }
}

/// Product view detail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductViewDetail {
    /// Summary of the product view
    pub product_view_summary: ProductViewSummary,
}

/// Product view summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductViewSummary {
    /// Product identifier
    pub product_id: String,
}

/// Summary of one provisioning artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisioningArtifactSummary {
    /// Artifact id
    pub id: String,
    /// Display name, conventionally `v<semver>`
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl ProvisioningArtifactSummary {
    /// Create new summary
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Result of one versioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// Product that was processed
    pub product_id: String,
    /// Policy applied
    pub action: Action,
    /// Latest artifact, when the policy computed it
    pub latest_artifact_id: Option<String>,
    /// Artifacts selected for update, in update order
    pub updated: Vec<String>,
    /// Artifacts left untouched
    pub skipped: Vec<String>,
}

impl UpdateOutcome {
    /// Number of artifacts selected for update
    #[inline]
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }
}
