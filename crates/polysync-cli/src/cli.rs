use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "polysync")]
#[command(about = "Keep policy-group component-version allow-lists in sync with releases")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Policy service API endpoint
    #[arg(
        long,
        global = true,
        env = "PULUMI_API_ENDPOINT",
        default_value = "https://api.pulumi.com"
    )]
    pub endpoint: String,

    /// API access token
    #[arg(long, global = true, env = "PULUMI_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Organization owning the policy groups
    #[arg(long, global = true, env = "PULUMI_ORG")]
    pub org: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Propagate a released component version into every policy group
    Sync(SyncArgs),
    /// List policy groups eligible for syncing
    Groups,
    /// Show the policy packs applied to one group
    Show(ShowArgs),
}

#[derive(clap::Args)]
pub struct SyncArgs {
    /// Name of the policy pack carrying the component-version allow-list
    #[arg(long, env = "POLICY_PACK")]
    pub policy_pack: String,

    /// Version to record for every listed component type
    #[arg(long, env = "COMPONENT_VERSION")]
    pub component_version: String,

    /// JSON array of component types to update (e.g. '["pkg:A","pkg:B"]')
    #[arg(long, env = "COMPONENT_TYPES")]
    pub component_types: String,
}

#[derive(clap::Args)]
pub struct ShowArgs {
    /// Policy group name
    pub group: String,
}
