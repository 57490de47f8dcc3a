//! SCV Core
//!
//! Pure data pipeline behind the Service Catalog versioning custom resource.
//!
//! # Overview
//!
//! - **Property resolution**: raw `ResourceProperties` → [`UpdateConfig`]
//! - **Normalization**: catalog product description → [`ArtifactRecord`]s
//! - **Selection**: latest artifact by semantic version, and the subset an
//!   [`Action`] applies to
//!
//! # Example
//!
//! ```rust
//! use scv_core::{normalize, select_for_update, Action, ProductDescription, ProvisioningArtifactSummary};
//!
//! let description = ProductDescription::new(
//!     "prod-abcdef1234567",
//!     vec![
//!         ProvisioningArtifactSummary::new("pa-old", "v1.1.9", "Update"),
//!         ProvisioningArtifactSummary::new("pa-new", "v1.1.10", "Fix"),
//!     ],
//! );
//!
//! let records = normalize(&description).unwrap();
//! let selected = select_for_update(&records, Action::AllExceptLatest).unwrap();
//! assert_eq!(selected.len(), 1);
//! assert_eq!(selected[0].artifact_id, "pa-old");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod normalize;
pub mod properties;
pub mod selection;
pub mod types;

// Re-exports
pub use error::{Result, SelectionError, ValidationError, VersioningError};
pub use normalize::normalize;
pub use properties::UpdateConfig;
pub use selection::{latest, select_for_update};
pub use types::{
    Action, ArtifactRecord, Guidance, ProductDescription, ProductId, ProductViewDetail,
    ProductViewSummary, ProvisioningArtifactSummary, UpdateOutcome,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for versioning operations
    pub use crate::{
        latest, normalize, select_for_update, Action, ArtifactRecord, Guidance, ProductDescription,
        ProductId, UpdateConfig, UpdateOutcome, VersioningError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
