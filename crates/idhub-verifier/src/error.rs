use idhub_client::HubClientError;

/// Why a single credential envelope was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("malformed credential envelope: {0}")]
    Decode(String),

    #[error("invalid credential claims: {0}")]
    Claims(String),

    #[error("invalid credential signature: {0}")]
    Signature(String),

    #[error("invalid verifiable credential: {0}")]
    Materialization(String),
}

/// Failure of a whole batch verification call.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Failed getting Identity Hub URL")]
    HubUrlNotResolved,

    #[error("{0}")]
    Fetch(#[from] HubClientError),
}

impl CredentialsError {
    /// Human-readable failure messages.
    pub fn failure_messages(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}
