//! Identity Hub Crypto: Ed25519 key material.

pub mod error;
pub mod keys;

pub use error::CryptoError;
pub use keys::{KeyPair, PublicKey, Signature};
