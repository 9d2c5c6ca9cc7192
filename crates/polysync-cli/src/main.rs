mod cli;
mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use polysync_core::error::SyncError;

use cli::{Cli, Commands};
use client::PolicyClient;
use output::print_error;

#[tokio::main]
async fn main() {
    // .env is optional; only complain when it exists but cannot be read.
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            eprintln!("Warning: failed to load .env file: {e}");
        }
    }

    init_tracing();

    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format.unwrap_or_default();
    let client = make_client(&cli)?;

    match &cli.command {
        Commands::Sync(args) => commands::sync::run(&client, args).await?,
        Commands::Groups => commands::groups::run(&client, format).await?,
        Commands::Show(args) => commands::show::run(&client, args, format).await?,
    }

    Ok(())
}

fn make_client(cli: &Cli) -> Result<PolicyClient> {
    let Some(token) = cli.access_token.as_deref() else {
        return Err(SyncError::configuration(
            "No access token configured. Use --access-token or set PULUMI_ACCESS_TOKEN",
        )
        .into());
    };
    let Some(org) = cli.org.as_deref() else {
        return Err(
            SyncError::configuration("No organization configured. Use --org or set PULUMI_ORG")
                .into(),
        );
    };
    if let Err(e) = url::Url::parse(&cli.endpoint) {
        return Err(
            SyncError::configuration(format!("Invalid API endpoint {}: {e}", cli.endpoint)).into(),
        );
    }
    Ok(PolicyClient::new(&cli.endpoint, org, token))
}
