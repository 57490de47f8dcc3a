//! Latest-version and update-set selection
//!
//! Versions are compared by semantic-version precedence: major, minor and
//! patch numerically, then pre-release. Build metadata does not take part.

use crate::error::SelectionError;
use crate::types::{Action, ArtifactRecord};
use std::cmp::Ordering;

/// Select the record with the highest version
///
/// When several records share the highest precedence the first one in
/// input order wins.
///
/// # Errors
/// `SelectionError::EmptyInput` if `records` is empty.
pub fn latest(records: &[ArtifactRecord]) -> Result<&ArtifactRecord, SelectionError> {
    let mut iter = records.iter();
    let first = iter.next().ok_or(SelectionError::EmptyInput)?;

    let latest = iter.fold(first, |best, candidate| {
        match candidate.version.cmp_precedence(&best.version) {
            Ordering::Greater => candidate,
            Ordering::Less | Ordering::Equal => best,
        }
    });

    tracing::debug!(
        artifact_id = %latest.artifact_id,
        version = %latest.version,
        "selected latest provisioning artifact"
    );
    Ok(latest)
}

/// Select the records an update applies to, in input order
///
/// # Errors
/// `SelectionError::EmptyInput` when the action needs the latest record and
/// `records` is empty.
pub fn select_for_update(
    records: &[ArtifactRecord],
    action: Action,
) -> Result<Vec<&ArtifactRecord>, SelectionError> {
    match action {
        Action::All => Ok(records.iter().collect()),
        Action::AllExceptLatest => {
            let latest_id = &latest(records)?.artifact_id;
            Ok(records
                .iter()
                .filter(|record| &record.artifact_id != latest_id)
                .collect())
        }
    }
}
