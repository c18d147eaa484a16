//! `idhub issue`: Sign a credential as a JWT.

use clap::Args;
use idhub_verifier::JwtClaims;
use std::path::PathBuf;

use super::{read_did_document, read_inline_or_file, read_keypair};

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Issuer's secret key file (hex).
    #[arg(short, long)]
    pub key: PathBuf,

    /// Issuer's DID Document (JSON file).
    #[arg(short, long)]
    pub issuer_document: PathBuf,

    /// Subject DID the credential is about.
    #[arg(short, long)]
    pub subject: String,

    /// Credential claims as a JSON object (inline or path to file).
    #[arg(short, long, default_value = "{}")]
    pub claims: String,

    /// Credential id. Defaults to a fresh `urn:uuid:`.
    #[arg(long)]
    pub id: Option<String>,

    /// Validity period in seconds.
    #[arg(long)]
    pub expires_in: Option<i64>,

    /// Write the token here instead of stdout.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Build and sign the JWT described by `args`.
pub fn issue_token(args: &IssueArgs) -> anyhow::Result<String> {
    let keypair = read_keypair(&args.key)?;
    let issuer = read_did_document(&args.issuer_document)?;

    let public_key = keypair.public_key().to_bs58();
    let method = issuer
        .verification_methods
        .iter()
        .find(|vm| vm.public_key_base58 == public_key)
        .ok_or_else(|| anyhow::anyhow!("key does not belong to {}", issuer.id))?;

    let raw_claims = read_inline_or_file(&args.claims)?;
    let mut vc = match serde_json::from_str::<serde_json::Value>(&raw_claims)? {
        serde_json::Value::Object(map) => map,
        _ => anyhow::bail!("claims must be a JSON object"),
    };
    let id = args
        .id
        .clone()
        .unwrap_or_else(|| format!("urn:uuid:{}", uuid::Uuid::now_v7()));
    vc.insert("id".into(), serde_json::Value::String(id));

    let mut claims = JwtClaims::new(&issuer.id, &args.subject, serde_json::Value::Object(vc));
    if let Some(secs) = args.expires_in {
        claims.exp = Some(chrono::Utc::now().timestamp() + secs);
    }
    Ok(claims.sign(&method.id, &keypair)?)
}

pub fn run(args: &IssueArgs) -> anyhow::Result<()> {
    let token = issue_token(args)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &token)?;
            println!("Credential written to {}", path.display());
        }
        None => println!("{}", token),
    }
    Ok(())
}
