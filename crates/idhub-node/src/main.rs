//! Identity Hub Node: entry point.
//!
//! Starts the hub with configuration from a TOML file or defaults.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use idhub_node::{start_api_server, HubNodeConfig, HubState, InMemoryHubStore};

/// Identity Hub Node
#[derive(Parser, Debug)]
#[command(name = "idhub-node", version, about = "Identity Hub Node")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "idhub.toml")]
    config: PathBuf,

    /// Override the API port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the DID this hub serves.
    #[arg(long)]
    did: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

fn init_tracing(config: &HubNodeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.json_logs() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Handle --init flag
    if args.init {
        let config = HubNodeConfig::default();
        config.save(&args.config)?;
        println!("wrote default config to {}", args.config.display());
        return Ok(());
    }

    let mut config = HubNodeConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(did) = args.did {
        config.hub.did = Some(did);
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config);
    tracing::info!("Identity Hub Node v{}", env!("CARGO_PKG_VERSION"));

    let listen_addr = config.api_socket_addr()?;
    let state = Arc::new(HubState::new(
        Arc::new(InMemoryHubStore::new()),
        config.hub.did.clone(),
    ));

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received shutdown signal"),
            Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
        }
    };

    start_api_server(listen_addr, state, shutdown).await?;
    tracing::info!("Identity Hub node exited cleanly");
    Ok(())
}
