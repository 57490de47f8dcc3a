//! SCV operator CLI
//!
//! `scv plan` works offline from a `describe-product-as-admin` JSON dump;
//! `scv apply` runs against the live catalog. Both resolve their options
//! through the same property rules as the custom resource.

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use scv_core::properties::{resolve_action, ACTION, ACTIVE, GUIDANCE, PRODUCT_ID};
use scv_core::{ProductDescription, UpdateOutcome};
use scv_handler::UpdatePlan;
use serde_json::{json, Map, Value};
use std::fmt::Write as _;
use std::path::Path;

/// Command-line definition
#[must_use]
pub fn build_cli() -> Command {
    Command::new("scv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Service Catalog provisioning artifact versioner")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("plan")
                .about("Show which artifacts an action would update, from a describe-product dump")
                .arg(
                    Arg::new("describe")
                        .long("describe")
                        .required(true)
                        .help("Path to describe-product-as-admin JSON output"),
                )
                .arg(
                    Arg::new("action")
                        .long("action")
                        .help("ALL or ALL_EXCEPT_LATEST (default ALL)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Update a product's provisioning artifacts")
                .arg(
                    Arg::new("product-id")
                        .long("product-id")
                        .required(true)
                        .help("Product id (prod-...)"),
                )
                .arg(
                    Arg::new("active")
                        .long("active")
                        .help("Active flag; only \"false\" deactivates (default true)"),
                )
                .arg(
                    Arg::new("guidance")
                        .long("guidance")
                        .help("DEFAULT or DEPRECATED (default DEFAULT)"),
                )
                .arg(
                    Arg::new("action")
                        .long("action")
                        .help("ALL or ALL_EXCEPT_LATEST (default ALL)"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Describe and plan without updating"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

/// Turn `apply` options into a resource property map
#[must_use]
pub fn properties_from_matches(args: &ArgMatches) -> Map<String, Value> {
    let mut properties = Map::new();
    for (arg, key) in [
        ("product-id", PRODUCT_ID),
        ("active", ACTIVE),
        ("guidance", GUIDANCE),
        ("action", ACTION),
    ] {
        if let Some(value) = args.get_one::<String>(arg) {
            properties.insert(key.to_string(), Value::String(value.clone()));
        }
    }
    properties
}

/// Build a plan from a dump on disk
///
/// # Errors
/// Unreadable file, malformed JSON, invalid action or artifact versions.
pub fn plan_from_file(path: &Path, action: Option<&str>) -> anyhow::Result<UpdatePlan> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let description: ProductDescription = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;

    let action_value = action.map(|a| Value::String(a.to_string()));
    let action = resolve_action(action_value.as_ref())?;
    Ok(UpdatePlan::build(&description, action)?)
}

/// Human-readable plan
#[must_use]
pub fn render_plan(plan: &UpdatePlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "product: {}", plan.product_id);
    let _ = writeln!(out, "action:  {}", plan.action);
    if let Some(latest) = &plan.latest {
        let _ = writeln!(out, "latest:  {} (v{})", latest.artifact_id, latest.version);
    }
    let _ = writeln!(out, "update ({}):", plan.selected.len());
    for record in &plan.selected {
        let _ = writeln!(out, "  {}  v{:<10} {}", record.artifact_id, record.version, record.description);
    }
    if !plan.skipped.is_empty() {
        let _ = writeln!(out, "keep ({}):", plan.skipped.len());
        for record in &plan.skipped {
            let _ = writeln!(out, "  {}  v{:<10} {}", record.artifact_id, record.version, record.description);
        }
    }
    out
}

/// JSON view of a plan
#[must_use]
pub fn plan_json(plan: &UpdatePlan) -> Value {
    json!({
        "productId": plan.product_id,
        "action": plan.action,
        "latest": plan.latest,
        "selected": plan.selected,
        "skipped": plan.skipped,
    })
}

/// Human-readable outcome of an applied update
#[must_use]
pub fn render_outcome(outcome: &UpdateOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "updated {} provisioning artifact(s) of {} ({})",
        outcome.updated_count(),
        outcome.product_id,
        outcome.action
    );
    for id in &outcome.updated {
        let _ = writeln!(out, "  {id}");
    }
    if !outcome.skipped.is_empty() {
        let _ = writeln!(out, "kept: {}", outcome.skipped.join(", "));
    }
    out
}
