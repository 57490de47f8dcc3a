//! `scv` operator CLI

use anyhow::Context;
use scv_catalog::ServiceCatalogGateway;
use scv_cli::{
    build_cli, plan_from_file, plan_json, properties_from_matches, render_outcome, render_plan,
};
use scv_core::UpdateConfig;
use scv_handler::settings::{LogFormat, LOG_FILTER_VAR, LOG_FORMAT_VAR};
use scv_handler::telemetry::init_tracing_with_writer;
use scv_handler::{ArtifactVersioner, RuntimeSettings};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Quieter defaults than the Lambda: warnings only, plain text on stderr
    let mut settings = RuntimeSettings::from_env()?;
    if std::env::var_os(LOG_FILTER_VAR).is_none() {
        settings = settings.with_log_filter("warn");
    }
    if std::env::var_os(LOG_FORMAT_VAR).is_none() {
        settings = settings.with_log_format(LogFormat::Text);
    }
    init_tracing_with_writer(&settings, std::io::stderr);

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("plan", args)) => {
            let path = args
                .get_one::<String>("describe")
                .context("--describe is required")?;
            let action = args.get_one::<String>("action").map(String::as_str);

            let plan = plan_from_file(Path::new(path), action)?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&plan_json(&plan))?);
            } else {
                print!("{}", render_plan(&plan));
            }
        }
        Some(("apply", args)) => {
            let config = UpdateConfig::from_properties(&properties_from_matches(args))?;
            tracing::debug!(
                product_id = %config.product_id,
                dry_run = args.get_flag("dry-run"),
                "applying"
            );
            let versioner = ArtifactVersioner::new(ServiceCatalogGateway::from_env().await);

            if args.get_flag("dry-run") {
                let plan = versioner.plan(&config).await?;
                if args.get_flag("json") {
                    println!("{}", serde_json::to_string_pretty(&plan_json(&plan))?);
                } else {
                    print!("{}", render_plan(&plan));
                }
            } else {
                let outcome = versioner.apply(&config).await?;
                if args.get_flag("json") {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                } else {
                    print!("{}", render_outcome(&outcome));
                }
            }
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(())
}
