//! Shared node state for the HTTP handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::store::HubStore;

/// Shared state for the running hub.
pub struct HubState {
    /// Credential collection served by this hub.
    pub store: Arc<dyn HubStore>,
    /// DID of the subject this hub serves, if configured.
    pub did: Option<String>,
    /// When the node started.
    pub start_time: Instant,
}

impl HubState {
    pub fn new(store: Arc<dyn HubStore>, did: Option<String>) -> Self {
        Self {
            store,
            did,
            start_time: Instant::now(),
        }
    }
}
