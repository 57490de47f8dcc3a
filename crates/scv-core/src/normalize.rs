//! Artifact normalization
//!
//! Turns a catalog product description into a flat, ordered list of
//! [`ArtifactRecord`]s. Summary names carry a one-character marker in front
//! of the semantic version (`v1.2.3`); the marker is dropped before parsing.

use crate::error::ValidationError;
use crate::types::{ArtifactRecord, ProductDescription, ProvisioningArtifactSummary};
use semver::Version;

/// Normalize every artifact summary of a product, preserving service order
///
/// # Errors
/// `ValidationError::InvalidVersion` for the first summary whose name is
/// not a marker followed by a semantic version. Nothing is skipped.
pub fn normalize(description: &ProductDescription) -> Result<Vec<ArtifactRecord>, ValidationError> {
    let product_id = description.product_id();
    let records = description
        .provisioning_artifact_summaries
        .iter()
        .map(|summary| normalize_summary(product_id, summary))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        product_id,
        artifacts = records.len(),
        "normalized provisioning artifacts"
    );
    Ok(records)
}

fn normalize_summary(
    product_id: &str,
    summary: &ProvisioningArtifactSummary,
) -> Result<ArtifactRecord, ValidationError> {
    let stripped = strip_marker(&summary.name);
    let version = Version::parse(stripped).map_err(|source| ValidationError::InvalidVersion {
        artifact_id: summary.id.clone(),
        name: summary.name.clone(),
        version: stripped.to_string(),
        source,
    })?;

    Ok(ArtifactRecord::new(
        product_id,
        summary.id.as_str(),
        version,
        summary.description.as_str(),
    ))
}

/// Drop exactly the first character, whatever it is
#[inline]
fn strip_marker(name: &str) -> &str {
    let mut chars = name.chars();
    chars.next();
    chars.as_str()
}
