//! Identity Hub Core: shared types for the credential verification pipeline.
//!
//! - DID Documents and their service / verification-method descriptors
//! - Format-tagged credential envelopes
//! - Hub request/response wire messages
//! - Verifier and hub client configuration

pub mod config;
pub mod document;
pub mod envelope;
pub mod error;
pub mod hub;

pub use config::{HubClientConfig, VerifierConfig};
pub use document::{DidDocument, Service, VerificationMethod, IDENTITY_HUB_SERVICE_TYPE};
pub use envelope::{CredentialEnvelope, JwtCredentialEnvelope, JWT_VC_FORMAT};
pub use error::CoreError;
pub use hub::{
    Descriptor, MessageRequestObject, MessageResponseObject, RequestObject, RequestStatus,
    ResponseObject,
};
