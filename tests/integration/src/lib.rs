//! Shared fixtures for the cross-crate tests: a hub node on an ephemeral
//! port and an issuer/subject pair registered in one DID registry.

use std::net::SocketAddr;
use std::sync::Arc;

use idhub_core::{DidDocument, VerifierConfig, IDENTITY_HUB_SERVICE_TYPE};
use idhub_crypto::KeyPair;
use idhub_identity::{DidManager, LocalDidResolver};
use idhub_node::{build_router, HubState, InMemoryHubStore};
use idhub_verifier::{
    DidJwtCredentialsVerifier, IdentityHubCredentialsVerifier, JwtClaims,
    JwtCredentialEnvelopeVerifier,
};
use tokio::task::JoinHandle;

/// A hub node serving on 127.0.0.1 until dropped.
pub struct RunningHub {
    pub url: String,
    pub addr: SocketAddr,
    pub state: Arc<HubState>,
    server: JoinHandle<()>,
}

impl RunningHub {
    pub async fn start(did: Option<String>) -> Self {
        let state = Arc::new(HubState::new(Arc::new(InMemoryHubStore::new()), did));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let app = build_router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "test hub stopped");
            }
        });
        Self {
            url: format!("http://{}/", addr),
            addr,
            state,
            server,
        }
    }
}

impl Drop for RunningHub {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// One trusted issuer and one subject whose DID Document points at a hub.
pub struct Parties {
    pub registry: Arc<DidManager>,
    pub issuer_key: KeyPair,
    pub issuer: DidDocument,
    pub subject: DidDocument,
}

impl Parties {
    pub fn new(hub_url: &str) -> Self {
        let registry = Arc::new(DidManager::new());
        let issuer_key = KeyPair::generate();
        let issuer = registry.create_did(&issuer_key).expect("issuer DID");
        let mut subject = registry
            .create_did(&KeyPair::generate())
            .expect("subject DID");
        subject.add_service(IDENTITY_HUB_SERVICE_TYPE, hub_url);
        registry.update(subject.clone()).expect("update subject");
        Self {
            registry,
            issuer_key,
            issuer,
            subject,
        }
    }

    /// A credential about the subject, signed by the issuer.
    pub fn issue(&self, id: &str, claims: serde_json::Value) -> String {
        self.issue_about(&self.subject.id, id, claims)
    }

    pub fn issue_about(&self, subject: &str, id: &str, claims: serde_json::Value) -> String {
        let mut vc = claims;
        vc["id"] = serde_json::Value::String(id.to_string());
        JwtClaims::new(&self.issuer.id, subject, vc)
            .sign(&self.issuer.verification_methods[0].id, &self.issuer_key)
            .expect("sign credential")
    }

    /// A credential naming the issuer but signed with an unrelated key.
    pub fn forge(&self, id: &str) -> String {
        JwtClaims::new(
            &self.issuer.id,
            &self.subject.id,
            serde_json::json!({ "id": id }),
        )
        .sign(
            &self.issuer.verification_methods[0].id,
            &KeyPair::generate(),
        )
        .expect("sign credential")
    }

    /// Full pipeline over HTTP, trusting the issuers in this registry.
    pub fn verifier(&self, config: VerifierConfig) -> IdentityHubCredentialsVerifier {
        let jwt_verifier = DidJwtCredentialsVerifier::new(
            Arc::new(LocalDidResolver::new(self.registry.clone())),
            config.clock_skew_secs,
        );
        let client = idhub_client::HttpHubClient::new(&Default::default())
            .expect("build hub client");
        IdentityHubCredentialsVerifier::new(
            Arc::new(client),
            Arc::new(JwtCredentialEnvelopeVerifier::new(Arc::new(jwt_verifier))),
            config,
        )
    }
}
