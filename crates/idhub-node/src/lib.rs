//! Identity Hub Node
//!
//! Serves one DID subject's credential envelopes over the hub protocol. The
//! binary wires these pieces to a config file; tests mount the router
//! directly.

pub mod api;
pub mod config;
pub mod state;
pub mod store;

pub use api::{build_router, start_api_server};
pub use config::HubNodeConfig;
pub use state::HubState;
pub use store::{HubStore, InMemoryHubStore};
