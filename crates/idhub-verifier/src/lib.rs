//! Identity Hub Verifier
//!
//! Turns the raw contents of a DID subject's identity hub into the list of
//! credentials that verify:
//!
//! - [`JwtCredentialsVerifier`]: claim and signature checks on a decoded JWT
//! - [`CredentialEnvelopeVerifier`]: decode, check, and materialize one envelope
//! - [`IdentityHubCredentialsVerifier`]: fetch a hub's envelopes and keep the
//!   ones that verify, logging a warning for each one that does not

pub mod claims;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod hub;
pub mod jwt;

pub use claims::{DidJwtCredentialsVerifier, JwtCredentialsVerifier};
pub use credential::Credential;
pub use envelope::{CredentialEnvelopeVerifier, JwtCredentialEnvelopeVerifier};
pub use error::{CredentialsError, VerificationError};
pub use hub::IdentityHubCredentialsVerifier;
pub use jwt::{DecodedJwt, JwtClaims};
