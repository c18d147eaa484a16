//! Identity Hub CLI.
//!
//! Subcommands: init, issue, push, verify.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Identity Hub: publish and verify Verifiable Credentials.
#[derive(Parser, Debug)]
#[command(name = "idhub", version, about, long_about = None)]
struct Cli {
    /// Log level for diagnostics on stderr (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a key pair and its DID Document.
    Init(commands::init::InitArgs),
    /// Sign a credential as a JWT.
    Issue(commands::issue::IssueArgs),
    /// Publish a credential envelope on an identity hub.
    Push(commands::push::PushArgs),
    /// Fetch and verify the credentials on a subject's identity hub.
    Verify(commands::verify::VerifyArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Issue(args) => commands::issue::run(args),
        Commands::Push(args) => commands::push::run(args).await,
        Commands::Verify(args) => commands::verify::run(args).await,
    }
}
