use std::time::Duration;

use async_trait::async_trait;
use idhub_core::{HubClientConfig, MessageResponseObject, RequestObject, ResponseObject};

use crate::error::HubClientError;

/// Access to the credential collection of an identity hub.
#[async_trait]
pub trait HubClient: Send + Sync {
    /// Fetch every raw credential envelope published on the hub.
    async fn get_verifiable_credentials(
        &self,
        hub_base_url: &str,
    ) -> Result<Vec<Vec<u8>>, HubClientError>;

    /// Publish one raw credential envelope on the hub.
    async fn add_verifiable_credential(
        &self,
        hub_base_url: &str,
        envelope: &[u8],
    ) -> Result<(), HubClientError>;
}

/// [`HubClient`] speaking the hub JSON protocol over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHubClient {
    http: reqwest::Client,
}

impl HttpHubClient {
    pub fn new(config: &HubClientConfig) -> Result<Self, HubClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HubClientError::fatal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }

    /// Build from an existing reqwest client (shared connection pool).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Send a single-message request and return the reply to that message.
    async fn send(
        &self,
        hub_base_url: &str,
        request: &RequestObject,
    ) -> Result<MessageResponseObject, HubClientError> {
        tracing::debug!(
            url = hub_base_url,
            request_id = %request.request_id,
            "sending identity hub request"
        );

        let response = self.http.post(hub_base_url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubClientError::fatal(format!(
                "IdentityHub returned HTTP {}",
                status
            )));
        }

        let body: ResponseObject = response.json().await.map_err(|e| {
            HubClientError::fatal(format!("invalid IdentityHub response body: {}", e))
        })?;

        if !body.status.is_success() {
            return Err(HubClientError::fatal(format!(
                "IdentityHub request failed ({}): {}",
                body.status.code, body.status.detail
            )));
        }

        let reply = body
            .replies
            .into_iter()
            .next()
            .ok_or_else(|| HubClientError::fatal("IdentityHub response contains no reply"))?;

        if !reply.status.is_success() {
            return Err(HubClientError::fatal(format!(
                "IdentityHub message failed ({}): {}",
                reply.status.code, reply.status.detail
            )));
        }

        Ok(reply)
    }
}

#[async_trait]
impl HubClient for HttpHubClient {
    async fn get_verifiable_credentials(
        &self,
        hub_base_url: &str,
    ) -> Result<Vec<Vec<u8>>, HubClientError> {
        let reply = self
            .send(hub_base_url, &RequestObject::collections_query())
            .await?;
        reply.decoded_entries().map_err(|e| {
            HubClientError::fatal(format!("invalid IdentityHub entry: {}", e))
        })
    }

    async fn add_verifiable_credential(
        &self,
        hub_base_url: &str,
        envelope: &[u8],
    ) -> Result<(), HubClientError> {
        self.send(hub_base_url, &RequestObject::collections_write(envelope))
            .await
            .map(|_| ())
    }
}
