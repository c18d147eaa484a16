pub mod init;
pub mod issue;
pub mod push;
pub mod verify;

use idhub_core::DidDocument;
use idhub_crypto::KeyPair;
use std::path::Path;

/// Read a DID Document from a JSON file.
pub fn read_did_document(path: &Path) -> anyhow::Result<DidDocument> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("invalid DID Document {}: {}", path.display(), e))
}

/// Read a hex-encoded Ed25519 secret key from a file.
pub fn read_keypair(path: &Path) -> anyhow::Result<KeyPair> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    Ok(KeyPair::from_hex(contents.trim())?)
}

/// Treat `value` as a path if such a file exists, otherwise as inline text.
pub fn read_inline_or_file(value: &str) -> anyhow::Result<String> {
    if Path::new(value).is_file() {
        Ok(std::fs::read_to_string(value)?)
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
pub(crate) fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("idhub-cli-test-{}", rand::random::<u64>()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
