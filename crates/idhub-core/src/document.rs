use serde::{Deserialize, Serialize};

/// Service type advertised by a DID subject's identity hub.
pub const IDENTITY_HUB_SERVICE_TYPE: &str = "IdentityHub";

/// A verification method within a DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    /// Verification method identifier (e.g., "did:idhub:key:abc#keys-1").
    pub id: String,
    /// Type of the verification method (e.g., "Ed25519VerificationKey2020").
    #[serde(rename = "type")]
    pub method_type: String,
    /// The DID that controls this verification method.
    pub controller: String,
    /// Base58-encoded public key material.
    pub public_key_base58: String,
}

/// A service endpoint in a DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service name (e.g., "IdentityHub" or "did:idhub:key:abc#hub").
    pub id: String,
    /// Service type (e.g., "IdentityHub").
    #[serde(rename = "type")]
    pub service_type: String,
    /// Service endpoint URL.
    pub service_endpoint: String,
}

impl Service {
    /// Create a service descriptor.
    pub fn new(
        id: impl Into<String>,
        service_type: impl Into<String>,
        service_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            service_type: service_type.into(),
            service_endpoint: service_endpoint.into(),
        }
    }
}

/// W3C-compatible DID Document.
///
/// Only the parts the verification pipeline reads are modelled: the subject
/// identifier, its keys, and its service endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    /// The DID subject (e.g., "did:idhub:key:<bs58_pubkey>").
    pub id: String,
    /// Verification methods (public keys) associated with this DID.
    #[serde(default, rename = "verificationMethod")]
    pub verification_methods: Vec<VerificationMethod>,
    /// Service endpoints, in declaration order.
    #[serde(default, rename = "service")]
    pub services: Vec<Service>,
}

impl DidDocument {
    /// Create an empty DID Document for the given subject.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            verification_methods: Vec::new(),
            services: Vec::new(),
        }
    }

    /// Add a service endpoint.
    pub fn add_service(&mut self, service_type: &str, endpoint: &str) {
        let idx = self.services.len() + 1;
        self.services.push(Service {
            id: format!("{}#service-{}", self.id, idx),
            service_type: service_type.to_string(),
            service_endpoint: endpoint.to_string(),
        });
    }

    /// Add an Ed25519 verification method.
    pub fn add_verification_method(&mut self, public_key_base58: &str) {
        let idx = self.verification_methods.len() + 1;
        self.verification_methods.push(VerificationMethod {
            id: format!("{}#keys-{}", self.id, idx),
            method_type: "Ed25519VerificationKey2020".to_string(),
            controller: self.id.clone(),
            public_key_base58: public_key_base58.to_string(),
        });
    }

    /// Endpoint of the first service with the given type.
    pub fn service_endpoint(&self, service_type: &str) -> Option<&str> {
        self.services
            .iter()
            .find(|s| s.service_type == service_type)
            .map(|s| s.service_endpoint.as_str())
    }

    /// Look up a verification method by its full id (`did#fragment`).
    pub fn verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        self.verification_methods.iter().find(|vm| vm.id == id)
    }

    /// Get the primary public key (first verification method) in base58.
    pub fn primary_public_key_base58(&self) -> Option<&str> {
        self.verification_methods
            .first()
            .map(|vm| vm.public_key_base58.as_str())
    }
}
