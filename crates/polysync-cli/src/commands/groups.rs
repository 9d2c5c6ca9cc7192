use anyhow::Result;

use polysync_core::discovery;
use polysync_core::service::PolicyService;

use crate::cli::OutputFormat;
use crate::client::PolicyClient;
use crate::output::print_groups;

pub async fn run(client: &PolicyClient, format: OutputFormat) -> Result<()> {
    let listing = client.list_groups().await?;
    let eligible: Vec<_> = discovery::eligible(&listing.policy_groups)
        .cloned()
        .collect();
    print_groups(&eligible, format);
    Ok(())
}
