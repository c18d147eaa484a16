use crate::error::CoreError;

/// Media type of a JWT-encoded Verifiable Credential.
pub const JWT_VC_FORMAT: &str = "application/vc+jwt";

/// A JWT-encoded credential exactly as it was published to a hub.
///
/// The bytes are kept opaque here; decoding belongs to the verifier so that
/// a malformed token surfaces as a verification failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JwtCredentialEnvelope {
    raw: Vec<u8>,
}

impl JwtCredentialEnvelope {
    /// Wrap raw envelope bytes.
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// The raw serialized token.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }
}

/// A format-tagged wrapper around one serialized credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CredentialEnvelope {
    /// Compact JWS carrying a `vc` claim.
    Jwt(JwtCredentialEnvelope),
}

impl CredentialEnvelope {
    /// Wrap raw bytes as a JWT envelope.
    pub fn jwt(raw: impl Into<Vec<u8>>) -> Self {
        Self::Jwt(JwtCredentialEnvelope::new(raw))
    }

    /// Wrap raw bytes according to a media type.
    pub fn from_raw(format: &str, raw: impl Into<Vec<u8>>) -> Result<Self, CoreError> {
        match format {
            JWT_VC_FORMAT => Ok(Self::jwt(raw)),
            other => Err(CoreError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Media type of this envelope.
    pub fn format(&self) -> &'static str {
        match self {
            Self::Jwt(_) => JWT_VC_FORMAT,
        }
    }

    /// The raw serialized credential.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Jwt(jwt) => jwt.as_bytes(),
        }
    }
}
