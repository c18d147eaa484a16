//! `idhub init`: Create a key pair and its DID Document.

use clap::Args;
use idhub_core::{DidDocument, IDENTITY_HUB_SERVICE_TYPE};
use idhub_crypto::KeyPair;
use idhub_identity::DidManager;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory for the generated files.
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// File name stem for `<name>.did.json` and `<name>.key`.
    #[arg(short, long, default_value = "identity")]
    pub name: String,

    /// Identity hub URL to advertise in the DID Document.
    #[arg(long)]
    pub hub: Option<String>,
}

/// Paths written by [`create_identity`].
pub struct CreatedIdentity {
    pub document: DidDocument,
    pub document_path: PathBuf,
    pub key_path: PathBuf,
}

pub fn create_identity(
    out_dir: &Path,
    name: &str,
    hub: Option<&str>,
) -> anyhow::Result<CreatedIdentity> {
    let keypair = KeyPair::generate();
    let mut document = DidManager::new().create_did(&keypair)?;
    if let Some(hub) = hub {
        document.add_service(IDENTITY_HUB_SERVICE_TYPE, hub);
    }

    std::fs::create_dir_all(out_dir)?;
    let document_path = out_dir.join(format!("{}.did.json", name));
    let key_path = out_dir.join(format!("{}.key", name));
    std::fs::write(&document_path, serde_json::to_string_pretty(&document)?)?;
    std::fs::write(&key_path, keypair.secret_hex())?;

    Ok(CreatedIdentity {
        document,
        document_path,
        key_path,
    })
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let created = create_identity(&args.out_dir, &args.name, args.hub.as_deref())?;

    println!("Identity created!");
    println!("  DID:       {}", created.document.id);
    println!("  Document:  {}", created.document_path.display());
    println!("  Key:       {}", created.key_path.display());
    if let Some(hub) = &args.hub {
        println!("  Hub:       {}", hub);
    }
    Ok(())
}
