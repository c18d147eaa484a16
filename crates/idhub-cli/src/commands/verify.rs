//! `idhub verify`: Fetch and verify the credentials on a subject's identity hub.

use clap::Args;
use idhub_client::HttpHubClient;
use idhub_identity::{DidManager, LocalDidResolver};
use idhub_verifier::{
    Credential, DidJwtCredentialsVerifier, IdentityHubCredentialsVerifier,
    JwtCredentialEnvelopeVerifier,
};
use std::path::PathBuf;
use std::sync::Arc;

use super::read_did_document;
use crate::config::CliConfig;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// DID Document of the subject whose hub is checked (JSON file).
    #[arg(short, long)]
    pub did_document: PathBuf,

    /// DID Documents of trusted issuers (JSON files).
    #[arg(short, long = "issuer-document")]
    pub issuer_documents: Vec<PathBuf>,

    /// Optional TOML config file with `[verifier]` and `[client]` sections.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Build the verification pipeline and run it once.
pub async fn verify_hub(args: &VerifyArgs) -> anyhow::Result<Vec<Credential>> {
    let config = CliConfig::load(args.config.as_deref())?;
    let subject = read_did_document(&args.did_document)?;

    let issuers = Arc::new(DidManager::new());
    for path in &args.issuer_documents {
        issuers.register(read_did_document(path)?)?;
    }
    tracing::debug!(
        subject = %subject.id,
        issuers = issuers.count(),
        "loaded DID documents"
    );

    let jwt_verifier = DidJwtCredentialsVerifier::new(
        Arc::new(LocalDidResolver::new(issuers)),
        config.verifier.clock_skew_secs,
    );
    let verifier = IdentityHubCredentialsVerifier::new(
        Arc::new(HttpHubClient::new(&config.client)?),
        Arc::new(JwtCredentialEnvelopeVerifier::new(Arc::new(jwt_verifier))),
        config.verifier,
    );

    verifier
        .get_verified_credentials(&subject)
        .await
        .map_err(|e| anyhow::anyhow!(e.failure_messages().join("; ")))
}

pub async fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let credentials = verify_hub(args).await?;
    println!("{}", serde_json::to_string_pretty(&credentials)?);
    Ok(())
}
