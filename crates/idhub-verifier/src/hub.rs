use std::sync::Arc;

use futures::stream::{self, StreamExt};
use idhub_client::HubClient;
use idhub_core::{CredentialEnvelope, DidDocument, VerifierConfig};

use crate::credential::Credential;
use crate::envelope::CredentialEnvelopeVerifier;
use crate::error::CredentialsError;

/// Fetches the credentials published on a DID subject's identity hub and
/// keeps the ones that verify.
pub struct IdentityHubCredentialsVerifier {
    hub_client: Arc<dyn HubClient>,
    envelope_verifier: Arc<dyn CredentialEnvelopeVerifier>,
    config: VerifierConfig,
}

impl IdentityHubCredentialsVerifier {
    pub fn new(
        hub_client: Arc<dyn HubClient>,
        envelope_verifier: Arc<dyn CredentialEnvelopeVerifier>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            hub_client,
            envelope_verifier,
            config,
        }
    }

    /// Return every verified credential from the hub advertised by `did_document`.
    ///
    /// Fails only when the document has no hub service or the fetch fails.
    /// Envelopes that do not verify are dropped with one warning each, so an
    /// empty result means either an empty hub or nothing that verified.
    pub async fn get_verified_credentials(
        &self,
        did_document: &DidDocument,
    ) -> Result<Vec<Credential>, CredentialsError> {
        let hub_url = did_document
            .service_endpoint(&self.config.hub_service_type)
            .ok_or(CredentialsError::HubUrlNotResolved)?;
        tracing::debug!(did = %did_document.id, url = hub_url, "resolved identity hub");

        let raw_envelopes = self.hub_client.get_verifiable_credentials(hub_url).await?;
        let fetched = raw_envelopes.len();
        tracing::debug!(did = %did_document.id, count = fetched, "fetched credential envelopes");

        let verifier = &self.envelope_verifier;
        let outcomes: Vec<_> = stream::iter(raw_envelopes.into_iter().enumerate())
            .map(move |(index, raw)| async move {
                let envelope = CredentialEnvelope::jwt(raw);
                (index, verifier.verify(&envelope, did_document).await)
            })
            .buffered(self.config.verification_concurrency.max(1))
            .collect()
            .await;

        let mut credentials = Vec::with_capacity(outcomes.len());
        for (index, outcome) in outcomes {
            match outcome {
                Ok(credential) => credentials.push(credential),
                Err(e) => {
                    tracing::warn!(
                        did = %did_document.id,
                        index,
                        error = %e,
                        "skipping credential that failed verification"
                    );
                }
            }
        }

        tracing::info!(
            did = %did_document.id,
            fetched,
            verified = credentials.len(),
            rejected = fetched - credentials.len(),
            "identity hub credentials verified"
        );
        Ok(credentials)
    }
}
