//! SCV Catalog
//!
//! Gateway to the external catalog service. The pipeline uses exactly two
//! operations: describe a product and update one provisioning artifact.
//! [`ServiceCatalogGateway`] talks to AWS Service Catalog; enable the
//! `mocks` feature for a `mockall` mock of [`CatalogGateway`].

#![warn(missing_docs)]

pub mod error;
pub mod gateway;
pub mod service_catalog;

// Re-exports
pub use error::CatalogError;
pub use gateway::{ArtifactUpdate, CatalogGateway};
pub use service_catalog::ServiceCatalogGateway;

#[cfg(any(test, feature = "mocks"))]
pub use gateway::MockCatalogGateway;
