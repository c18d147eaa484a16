use std::sync::Arc;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use idhub_crypto::PublicKey;
use idhub_identity::DidResolver;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::de::IgnoredAny;

use crate::error::VerificationError;
use crate::jwt::{unverified_key, DecodedJwt};

/// Claim and signature checks on a decoded JWT credential.
#[async_trait]
pub trait JwtCredentialsVerifier: Send + Sync {
    /// Check the claims are consistent with each other and with the subject
    /// the credential is expected to describe.
    fn verify_claims(&self, jwt: &DecodedJwt, expected_subject: &str)
        -> Result<(), VerificationError>;

    /// Check the JWT was signed by a key of its issuer.
    async fn verify_signature(&self, jwt: &DecodedJwt) -> Result<(), VerificationError>;
}

/// [`JwtCredentialsVerifier`] resolving issuer keys from DID Documents.
pub struct DidJwtCredentialsVerifier {
    resolver: Arc<dyn DidResolver>,
    /// Leeway in seconds applied to `exp` and `nbf`.
    leeway: u64,
}

impl DidJwtCredentialsVerifier {
    pub fn new(resolver: Arc<dyn DidResolver>, clock_skew_secs: u64) -> Self {
        Self {
            resolver,
            leeway: clock_skew_secs,
        }
    }

    /// `EdDSA` only, `exp` and `nbf` checked when present, no audience.
    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.leeway = self.leeway;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation
    }
}

fn is_did(value: &str) -> bool {
    value
        .strip_prefix("did:")
        .and_then(|rest| rest.split_once(':'))
        .is_some_and(|(method, id)| !method.is_empty() && !id.is_empty())
}

fn is_time_error(e: &JwtError) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature
    )
}

fn time_error(e: JwtError) -> VerificationError {
    match e.kind() {
        ErrorKind::ExpiredSignature => VerificationError::Claims("credential has expired".into()),
        ErrorKind::ImmatureSignature => {
            VerificationError::Claims("credential is not yet valid".into())
        }
        _ => VerificationError::Claims(format!("invalid validity period: {}", e)),
    }
}

#[async_trait]
impl JwtCredentialsVerifier for DidJwtCredentialsVerifier {
    fn verify_claims(
        &self,
        jwt: &DecodedJwt,
        expected_subject: &str,
    ) -> Result<(), VerificationError> {
        let claims = jwt.claims();

        let issuer = match claims.iss.as_deref() {
            Some(iss) if !iss.is_empty() => iss,
            _ => return Err(VerificationError::Claims("missing issuer".into())),
        };
        if !is_did(issuer) {
            return Err(VerificationError::Claims(format!(
                "issuer {} is not a DID",
                issuer
            )));
        }
        let subject = match claims.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub,
            _ => return Err(VerificationError::Claims("missing subject".into())),
        };
        if subject != expected_subject {
            return Err(VerificationError::Claims(format!(
                "subject {} does not match {}",
                subject, expected_subject
            )));
        }

        // Validity period only; the signature is the other check's job.
        let mut validation = self.validation();
        validation.insecure_disable_signature_validation();
        unverified_key()
            .and_then(|key| jsonwebtoken::decode::<IgnoredAny>(jwt.token(), &key, &validation))
            .map(|_| ())
            .map_err(time_error)
    }

    async fn verify_signature(&self, jwt: &DecodedJwt) -> Result<(), VerificationError> {
        let issuer = jwt
            .claims()
            .iss
            .as_deref()
            .ok_or_else(|| VerificationError::Signature("missing issuer".into()))?;

        let document = self.resolver.resolve(issuer).await.map_err(|e| {
            VerificationError::Signature(format!("cannot resolve issuer {}: {}", issuer, e))
        })?;

        let method = match jwt.header().kid.as_deref() {
            Some(kid) => document.verification_method(kid).ok_or_else(|| {
                VerificationError::Signature(format!("unknown key id {}", kid))
            })?,
            None => document.verification_methods.first().ok_or_else(|| {
                VerificationError::Signature(format!("issuer {} has no keys", issuer))
            })?,
        };

        let public_key = PublicKey::from_bs58(&method.public_key_base58).map_err(|e| {
            VerificationError::Signature(format!("invalid key {}: {}", method.id, e))
        })?;
        let key = DecodingKey::from_ed_components(&URL_SAFE_NO_PAD.encode(public_key.as_bytes()))
            .map_err(|e| {
                VerificationError::Signature(format!("invalid key {}: {}", method.id, e))
            })?;

        match jsonwebtoken::decode::<IgnoredAny>(jwt.token(), &key, &self.validation()) {
            Ok(_) => Ok(()),
            Err(e) if is_time_error(&e) => Err(time_error(e)),
            Err(e) => Err(VerificationError::Signature(e.to_string())),
        }
    }
}
