//! Ed25519 key material.
//!
//! Public keys travel as base58 (`publicKeyBase58` in DID Documents); secret
//! keys are stored as the hex of their 32-byte seed.

use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::error::CryptoError;

const KEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

/// An issuer's signing key. ed25519-dalek zeroizes the seed on drop.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Deterministic key pair, mostly for tests.
    pub fn from_seed(seed: &[u8; KEY_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parse the hex form written by [`KeyPair::secret_hex`].
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            hex::decode(hex_str.trim())
                .map_err(|e| CryptoError::InvalidInput(format!("invalid hex: {}", e)))?,
        );
        let seed: Zeroizing<[u8; KEY_LEN]> =
            Zeroizing::new(bytes.as_slice().try_into().map_err(|_| {
                CryptoError::InvalidKeyLength {
                    expected: KEY_LEN,
                    actual: bytes.len(),
                }
            })?);
        Ok(Self::from_seed(&seed))
    }

    pub fn secret_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: self.signing_key.verifying_key(),
        }
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message))
    }

    /// PKCS#8 DER form of the key, the input JOSE libraries take for `EdDSA`.
    pub fn to_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.signing_key
            .to_pkcs8_der()
            .map(|document| Zeroizing::new(document.as_bytes().to_vec()))
            .map_err(|e| CryptoError::KeyEncoding(e.to_string()))
    }
}

/// An Ed25519 verification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: &[u8; KEY_LEN] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        VerifyingKey::from_bytes(raw)
            .map(|verifying_key| Self { verifying_key })
            .map_err(|e| CryptoError::InvalidInput(format!("invalid public key: {}", e)))
    }

    pub fn from_bs58(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| CryptoError::InvalidInput(format!("invalid base58: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        self.verifying_key.as_bytes()
    }

    pub fn to_bs58(&self) -> String {
        bs58::encode(self.as_bytes()).into_string()
    }

    /// Check `signature` over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        self.verifying_key
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// A detached Ed25519 signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(ed25519_dalek::Signature);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: &[u8; SIGNATURE_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidInput(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(ed25519_dalek::Signature::from_bytes(raw)))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0.to_bytes()
    }
}
