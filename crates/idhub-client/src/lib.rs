//! Identity Hub Client
//!
//! Reads and writes Verifiable Credential envelopes on an identity hub. The
//! [`HubClient`] trait is the seam the verifier depends on; [`HttpHubClient`]
//! speaks the hub's JSON protocol over HTTP.

pub mod client;
pub mod error;

pub use client::{HttpHubClient, HubClient};
pub use error::{HubClientError, ResponseStatus};
