//! Lambda entry point for the custom resource

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use scv_catalog::ServiceCatalogGateway;
use scv_handler::telemetry::init_tracing;
use scv_handler::{CustomResourceHandler, HttpResponseSender, RuntimeSettings};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let settings = RuntimeSettings::from_env()?;
    init_tracing(&settings);
    tracing::info!(version = scv_handler::VERSION, "starting scv-handler");

    let gateway = ServiceCatalogGateway::from_env().await;
    let sender = HttpResponseSender::new(settings.response_timeout)?;
    let handler = CustomResourceHandler::new(gateway, sender);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        tracing::debug!(aws_request_id = %event.context.request_id, "invocation");
        handler.handle_value(event.payload).await.map_err(Error::from)
    }))
    .await
}
