//! `idhub push`: Publish a credential envelope on an identity hub.

use clap::Args;
use idhub_client::{HttpHubClient, HubClient};

use super::read_inline_or_file;
use crate::config::CliConfig;

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Identity hub URL.
    #[arg(long)]
    pub hub: String,

    /// JWT credential (inline or path to file).
    #[arg(short, long)]
    pub envelope: String,

    /// Optional TOML config file.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
}

pub async fn run(args: &PushArgs) -> anyhow::Result<()> {
    let config = CliConfig::load(args.config.as_deref())?;
    let envelope = read_inline_or_file(&args.envelope)?;
    let client = HttpHubClient::new(&config.client)?;

    client
        .add_verifiable_credential(&args.hub, envelope.trim().as_bytes())
        .await
        .map_err(|e| anyhow::anyhow!("push failed ({}): {}", e.status, e))?;

    println!("Credential published to {}", args.hub);
    Ok(())
}
