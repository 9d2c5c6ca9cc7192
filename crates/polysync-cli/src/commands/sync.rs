use anyhow::{Context, Result};
use tracing::info;

use polysync_core::error::SyncError;
use polysync_core::sync;

use crate::cli::SyncArgs;
use crate::client::PolicyClient;
use crate::output::print_summary;

pub fn parse_component_types(raw: &str) -> polysync_core::Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| {
        SyncError::configuration(format!("COMPONENT_TYPES must be a JSON array of strings: {e}"))
    })
}

pub async fn run(client: &PolicyClient, args: &SyncArgs) -> Result<()> {
    let component_types = parse_component_types(&args.component_types)?;
    info!(
        pack = %args.policy_pack,
        version = %args.component_version,
        types = ?component_types,
        "starting component version sync"
    );

    let groups = sync::discover(client)
        .await
        .context("Failed to discover policy groups")?;

    let summary = sync::run(
        client,
        &groups,
        &args.policy_pack,
        &component_types,
        &args.component_version,
    )
    .await;

    print_summary(&summary);
    Ok(())
}
