use serde::{Deserialize, Serialize};

use crate::document::IDENTITY_HUB_SERVICE_TYPE;

/// Settings for the batch credential verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Service type that marks a DID Document's identity hub endpoint.
    #[serde(default = "default_hub_service_type")]
    pub hub_service_type: String,
    /// Leeway applied to `exp` and `nbf` checks, in seconds.
    #[serde(default = "default_clock_skew_secs")]
    pub clock_skew_secs: u64,
    /// Envelopes verified at once. Output order never depends on it.
    #[serde(default = "default_verification_concurrency")]
    pub verification_concurrency: usize,
}

/// Settings for the HTTP hub client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubClientConfig {
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_hub_service_type() -> String {
    IDENTITY_HUB_SERVICE_TYPE.into()
}
fn default_clock_skew_secs() -> u64 {
    60
}
fn default_verification_concurrency() -> usize {
    1
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            hub_service_type: default_hub_service_type(),
            clock_skew_secs: default_clock_skew_secs(),
            verification_concurrency: default_verification_concurrency(),
        }
    }
}

impl Default for HubClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}
