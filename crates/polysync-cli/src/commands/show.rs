use anyhow::Result;

use polysync_core::service::PolicyService;

use crate::cli::{OutputFormat, ShowArgs};
use crate::client::PolicyClient;
use crate::output::print_group_packs;

pub async fn run(client: &PolicyClient, args: &ShowArgs, format: OutputFormat) -> Result<()> {
    let group = client.get_group(&args.group).await?;
    print_group_packs(&args.group, &group, format);
    Ok(())
}
