//! SCV Handler
//!
//! CloudFormation custom resource that keeps a Service Catalog product's
//! provisioning artifacts in line with a versioning policy:
//! - Receives Create/Update/Delete events from the Lambda runtime
//! - Resolves `ResourceProperties` into an update policy
//! - Updates the selected artifacts through the catalog gateway
//! - Reports SUCCESS or FAILED to the event's response URL
//!
//! # Example
//!
//! ```rust,ignore
//! use scv_catalog::ServiceCatalogGateway;
//! use scv_handler::{CustomResourceHandler, HttpResponseSender};
//! use std::time::Duration;
//!
//! # async fn example(payload: serde_json::Value) -> Result<(), scv_handler::HandlerError> {
//! let gateway = ServiceCatalogGateway::from_env().await;
//! let sender = HttpResponseSender::new(Duration::from_secs(30))?;
//! let handler = CustomResourceHandler::new(gateway, sender);
//!
//! let response = handler.handle_value(payload).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod event;
pub mod handler;
pub mod response;
pub mod settings;
pub mod telemetry;
pub mod versioner;

// Re-exports for convenience
pub use error::HandlerError;
pub use event::{CustomResourceEvent, CustomResourceResponse, RequestType, ResponseStatus};
pub use handler::CustomResourceHandler;
pub use response::{HttpResponseSender, ResponseSender};
pub use settings::{LogFormat, RuntimeSettings};
pub use versioner::{ArtifactVersioner, UpdatePlan};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
