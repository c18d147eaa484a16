use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::VerificationError;
use crate::jwt::JwtClaims;

/// A verified credential.
///
/// Only produced by a [`CredentialEnvelopeVerifier`](crate::CredentialEnvelopeVerifier)
/// once every check has passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credential {
    id: String,
    issuer: String,
    subject: String,
    claims: Map<String, Value>,
}

impl Credential {
    /// Build the credential from checked JWT claims.
    ///
    /// The `vc` claim must be an object with a string `id`; its remaining
    /// members become the credential claims.
    pub(crate) fn from_jwt_claims(claims: &JwtClaims) -> Result<Self, VerificationError> {
        let vc = match &claims.vc {
            Some(Value::Object(vc)) => vc,
            Some(_) => {
                return Err(VerificationError::Materialization(
                    "vc claim is not an object".into(),
                ))
            }
            None => {
                return Err(VerificationError::Materialization(
                    "missing vc claim".into(),
                ))
            }
        };

        let id = match vc.get("id") {
            Some(Value::String(id)) if id.is_empty() => {
                return Err(VerificationError::Materialization(
                    "empty credential id".into(),
                ))
            }
            Some(Value::String(id)) => id.clone(),
            Some(_) => {
                return Err(VerificationError::Materialization(
                    "credential id is not a string".into(),
                ))
            }
            None => {
                return Err(VerificationError::Materialization(
                    "missing credential id".into(),
                ))
            }
        };

        let mut fields = vc.clone();
        fields.remove("id");

        Ok(Self {
            id,
            issuer: claims.iss.clone().unwrap_or_default(),
            subject: claims.sub.clone().unwrap_or_default(),
            claims: fields,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Look up a single claim.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }
}
