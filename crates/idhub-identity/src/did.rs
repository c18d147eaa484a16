use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use idhub_core::DidDocument;
use idhub_crypto::KeyPair;

use crate::error::IdentityError;

/// Prefix of DIDs derived from an Ed25519 public key.
pub const DID_KEY_PREFIX: &str = "did:idhub:key:";

/// In-memory registry of DID Documents.
#[derive(Default)]
pub struct DidManager {
    documents: DashMap<String, DidDocument>,
}

impl DidManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a DID for `keypair` and register its document.
    ///
    /// The document carries the key as its first verification method
    /// (`<did>#keys-1`).
    pub fn create_did(&self, keypair: &KeyPair) -> Result<DidDocument, IdentityError> {
        let did = format!("{}{}", DID_KEY_PREFIX, keypair.public_key().to_bs58());
        let mut document = DidDocument::new(did);
        document.add_verification_method(&keypair.public_key().to_bs58());
        self.register(document.clone())?;
        Ok(document)
    }

    /// Register an externally built document.
    pub fn register(&self, document: DidDocument) -> Result<(), IdentityError> {
        if !document.id.starts_with("did:") {
            return Err(IdentityError::InvalidDid(document.id));
        }
        match self.documents.entry(document.id.clone()) {
            Entry::Occupied(_) => Err(IdentityError::DuplicateDid(document.id)),
            Entry::Vacant(slot) => {
                tracing::debug!(did = %document.id, "registered DID document");
                slot.insert(document);
                Ok(())
            }
        }
    }

    /// Replace a registered document, e.g. after adding a service.
    pub fn update(&self, document: DidDocument) -> Result<(), IdentityError> {
        match self.documents.get_mut(&document.id) {
            Some(mut existing) => {
                *existing = document;
                Ok(())
            }
            None => Err(IdentityError::DidNotFound(document.id)),
        }
    }

    pub fn resolve_did(&self, did: &str) -> Option<DidDocument> {
        self.documents.get(did).map(|d| d.clone())
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }
}
