use std::sync::Arc;

use async_trait::async_trait;
use idhub_core::{CredentialEnvelope, DidDocument, JwtCredentialEnvelope};

use crate::claims::JwtCredentialsVerifier;
use crate::credential::Credential;
use crate::error::VerificationError;
use crate::jwt::DecodedJwt;

/// Verifies one credential envelope on behalf of a DID subject.
#[async_trait]
pub trait CredentialEnvelopeVerifier: Send + Sync {
    /// Decode, check, and materialize `envelope`.
    ///
    /// Every failure is returned as a value; nothing here panics on
    /// untrusted input.
    async fn verify(
        &self,
        envelope: &CredentialEnvelope,
        did_document: &DidDocument,
    ) -> Result<Credential, VerificationError>;
}

/// [`CredentialEnvelopeVerifier`] for JWT-encoded credentials.
pub struct JwtCredentialEnvelopeVerifier {
    jwt_verifier: Arc<dyn JwtCredentialsVerifier>,
}

impl JwtCredentialEnvelopeVerifier {
    pub fn new(jwt_verifier: Arc<dyn JwtCredentialsVerifier>) -> Self {
        Self { jwt_verifier }
    }

    async fn verify_jwt(
        &self,
        envelope: &JwtCredentialEnvelope,
        did_document: &DidDocument,
    ) -> Result<Credential, VerificationError> {
        let jwt = DecodedJwt::decode(envelope)?;
        self.jwt_verifier.verify_claims(&jwt, &did_document.id)?;
        self.jwt_verifier.verify_signature(&jwt).await?;
        Credential::from_jwt_claims(jwt.claims())
    }
}

#[async_trait]
impl CredentialEnvelopeVerifier for JwtCredentialEnvelopeVerifier {
    async fn verify(
        &self,
        envelope: &CredentialEnvelope,
        did_document: &DidDocument,
    ) -> Result<Credential, VerificationError> {
        match envelope {
            CredentialEnvelope::Jwt(jwt) => self.verify_jwt(jwt, did_document).await,
        }
    }
}
