use std::sync::Arc;

use async_trait::async_trait;
use idhub_core::DidDocument;

use crate::did::DidManager;
use crate::error::IdentityError;

/// Looks up the DID Document of an issuer.
#[async_trait]
pub trait DidResolver: Send + Sync {
    async fn resolve(&self, did: &str) -> Result<DidDocument, IdentityError>;
}

/// Resolves against the documents registered in a [`DidManager`].
pub struct LocalDidResolver {
    manager: Arc<DidManager>,
}

impl LocalDidResolver {
    pub fn new(manager: Arc<DidManager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl DidResolver for LocalDidResolver {
    async fn resolve(&self, did: &str) -> Result<DidDocument, IdentityError> {
        self.manager
            .resolve_did(did)
            .ok_or_else(|| IdentityError::DidNotFound(did.to_string()))
    }
}

/// Chains resolvers. The first one that knows the DID wins; if none does,
/// the error of the last one is returned.
#[derive(Default)]
pub struct CompositeDidResolver {
    resolvers: Vec<Arc<dyn DidResolver>>,
}

impl CompositeDidResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn DidResolver>) -> Self {
        self.add_resolver(resolver);
        self
    }

    pub fn add_resolver(&mut self, resolver: Arc<dyn DidResolver>) {
        self.resolvers.push(resolver);
    }

    pub fn resolver_count(&self) -> usize {
        self.resolvers.len()
    }
}

#[async_trait]
impl DidResolver for CompositeDidResolver {
    async fn resolve(&self, did: &str) -> Result<DidDocument, IdentityError> {
        let mut failure = None;
        for resolver in &self.resolvers {
            match resolver.resolve(did).await {
                Ok(document) => return Ok(document),
                Err(e) => {
                    tracing::debug!(did, error = %e, "DID not resolved, trying next resolver");
                    failure = Some(e);
                }
            }
        }
        Err(failure
            .unwrap_or_else(|| IdentityError::DidResolution("no resolvers configured".into())))
    }
}
