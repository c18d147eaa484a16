//! Identity Hub Identity Layer
//!
//! - DID minting for Ed25519 keys (`did:idhub:key:<base58>`)
//! - DID resolution (local, composite)

pub mod did;
pub mod did_resolver;
pub mod error;

pub use did::{DidManager, DID_KEY_PREFIX};
pub use did_resolver::{CompositeDidResolver, DidResolver, LocalDidResolver};
pub use error::IdentityError;
