use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use idhub_core::JwtCredentialEnvelope;
use idhub_crypto::{CryptoError, KeyPair};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::VerificationError;

/// Header parameters that are refused outright: `crit` names extensions this
/// verifier does not understand, the others would let a token choose its own
/// verification key.
const REJECTED_HEADER_PARAMS: [&str; 5] = ["crit", "jku", "jwk", "x5u", "x5c"];

/// Registered JWT claims plus the `vc` claim of a JWT-encoded credential.
///
/// Times are seconds since the Unix epoch. Fractional NumericDates are
/// accepted and truncated to whole seconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub exp: Option<i64>,
    #[serde(
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub nbf: Option<i64>,
    #[serde(
        default,
        deserialize_with = "numeric_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc: Option<serde_json::Value>,
}

impl JwtClaims {
    /// Claims for a credential issued by `issuer` about `subject`.
    pub fn new(issuer: &str, subject: &str, vc: serde_json::Value) -> Self {
        Self {
            iss: Some(issuer.to_string()),
            sub: Some(subject.to_string()),
            iat: Some(chrono::Utc::now().timestamp()),
            vc: Some(vc),
            ..Default::default()
        }
    }

    /// Sign the claims as an `EdDSA` JWT whose header names `kid`.
    pub fn sign(&self, kid: &str, keypair: &KeyPair) -> Result<String, CryptoError> {
        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = Some(kid.to_string());
        self.sign_with_header(&header, keypair)
    }

    /// Sign with a caller-built header. The header must declare `EdDSA`.
    pub fn sign_with_header(
        &self,
        header: &Header,
        keypair: &KeyPair,
    ) -> Result<String, CryptoError> {
        let der = keypair.to_pkcs8_der()?;
        jsonwebtoken::encode(header, self, &EncodingKey::from_ed_der(&der))
            .map_err(|e| CryptoError::Signing(e.to_string()))
    }
}

fn numeric_date<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(secs) = number.as_i64() {
        return Ok(Some(secs));
    }
    match number.as_f64() {
        Some(secs) if secs.is_finite() && secs.abs() < i64::MAX as f64 => {
            Ok(Some(secs.trunc() as i64))
        }
        _ => Err(de::Error::custom(format!(
            "NumericDate {} is out of range",
            number
        ))),
    }
}

/// A JWT envelope with its header screened and its claims parsed.
///
/// Nothing about the signature or the validity period is checked here.
#[derive(Debug, Clone)]
pub struct DecodedJwt {
    token: String,
    header: Header,
    claims: JwtClaims,
}

impl DecodedJwt {
    /// Decode an envelope. Any structural problem is a [`VerificationError::Decode`].
    pub fn decode(envelope: &JwtCredentialEnvelope) -> Result<Self, VerificationError> {
        let token = std::str::from_utf8(envelope.as_bytes())
            .map_err(|_| VerificationError::Decode("token is not valid UTF-8".into()))?
            .trim();

        screen_header(token)?;

        let header = jsonwebtoken::decode_header(token)
            .map_err(|e| VerificationError::Decode(format!("invalid header: {}", e)))?;
        if header.alg != Algorithm::EdDSA {
            return Err(VerificationError::Decode(format!(
                "unsupported algorithm {:?}",
                header.alg
            )));
        }

        let claims = unverified_key()
            .and_then(|key| {
                jsonwebtoken::decode::<JwtClaims>(token, &key, &parse_only_validation())
            })
            .map_err(|e| VerificationError::Decode(format!("invalid claims set: {}", e)))?
            .claims;

        Ok(Self {
            token: token.to_string(),
            header,
            claims,
        })
    }

    /// The compact token, as received.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &JwtClaims {
        &self.claims
    }
}

/// The typed header drops parameters it does not model, so the raw JSON is
/// checked for the refused ones first.
fn screen_header(token: &str) -> Result<(), VerificationError> {
    let (encoded, _) = token.split_once('.').ok_or_else(|| {
        VerificationError::Decode("expected three dot-separated segments".into())
    })?;
    let json = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| VerificationError::Decode(format!("invalid header encoding: {}", e)))?;
    let header: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(&json)
        .map_err(|e| VerificationError::Decode(format!("invalid header JSON: {}", e)))?;

    match REJECTED_HEADER_PARAMS
        .iter()
        .find(|param| header.contains_key(**param))
    {
        Some(param) => Err(VerificationError::Decode(format!(
            "header parameter {} is not supported",
            param
        ))),
        None => Ok(()),
    }
}

/// Key passed to jsonwebtoken while signature checking is off. It only has to
/// be a well-formed Ed25519 key so the `EdDSA` key-family check passes.
pub(crate) fn unverified_key() -> jsonwebtoken::errors::Result<DecodingKey> {
    let placeholder = KeyPair::from_seed(&[0u8; 32]).public_key();
    DecodingKey::from_ed_components(&URL_SAFE_NO_PAD.encode(placeholder.as_bytes()))
}

fn parse_only_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

/// Test helper: sign arbitrary header and payload JSON with `keypair`,
/// bypassing the typed header so unusual parameters can be set.
#[cfg(test)]
pub(crate) fn sign_raw(
    header: &serde_json::Value,
    payload: &serde_json::Value,
    keypair: &KeyPair,
) -> String {
    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(header).unwrap()),
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap())
    );
    let signature = keypair.sign(signing_input.as_bytes());
    format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(token: &str) -> JwtCredentialEnvelope {
        JwtCredentialEnvelope::new(token.as_bytes().to_vec())
    }

    #[test]
    fn test_decode_signed_claims() {
        let kp = KeyPair::generate();
        let claims = JwtClaims::new(
            "did:idhub:key:issuer",
            "did:idhub:key:subject",
            json!({ "id": "urn:uuid:1" }),
        );
        let token = claims.sign("did:idhub:key:issuer#keys-1", &kp).unwrap();

        let decoded = DecodedJwt::decode(&envelope(&token)).unwrap();
        assert_eq!(decoded.claims(), &claims);
        assert_eq!(decoded.header().alg, Algorithm::EdDSA);
        assert_eq!(
            decoded.header().kid.as_deref(),
            Some("did:idhub:key:issuer#keys-1")
        );
        assert_eq!(decoded.token(), token);
    }

    #[test]
    fn test_decode_rejects_non_jwt() {
        for token in ["definitely not a token", "", "a.b", "a.b.c.d"] {
            assert!(
                matches!(
                    DecodedJwt::decode(&envelope(token)),
                    Err(VerificationError::Decode(_))
                ),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let env = JwtCredentialEnvelope::new(vec![0xff, 0xfe, 0x2e]);
        assert!(matches!(
            DecodedJwt::decode(&env),
            Err(VerificationError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_object_payload() {
        let token = sign_raw(&json!({ "alg": "EdDSA" }), &json!([1, 2, 3]), &KeyPair::generate());
        assert!(matches!(
            DecodedJwt::decode(&envelope(&token)),
            Err(VerificationError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_other_algorithms() {
        let kp = KeyPair::generate();
        for alg in ["HS256", "none", "ES256K"] {
            let token = sign_raw(&json!({ "alg": alg }), &json!({}), &kp);
            assert!(
                matches!(
                    DecodedJwt::decode(&envelope(&token)),
                    Err(VerificationError::Decode(_))
                ),
                "alg {} should be rejected",
                alg
            );
        }
    }

    #[test]
    fn test_decode_rejects_critical_and_key_bearing_headers() {
        let kp = KeyPair::generate();
        let payload = json!({ "iss": "did:idhub:key:issuer" });
        for (param, value) in [
            ("crit", json!(["urn:example:must-understand"])),
            ("jku", json!("https://keys.example.com/jwks.json")),
            ("jwk", json!({ "kty": "OKP", "crv": "Ed25519", "x": "AA" })),
            ("x5u", json!("https://keys.example.com/cert.pem")),
            ("x5c", json!(["MIIB"])),
        ] {
            let mut header = json!({ "alg": "EdDSA", "kid": "did:idhub:key:issuer#keys-1" });
            header[param] = value;
            let err = DecodedJwt::decode(&envelope(&sign_raw(&header, &payload, &kp))).unwrap_err();
            assert_eq!(
                err,
                VerificationError::Decode(format!("header parameter {} is not supported", param))
            );
        }
    }

    #[test]
    fn test_decode_accepts_fractional_numeric_dates() {
        let payload = json!({
            "iss": "did:idhub:key:issuer",
            "sub": "did:idhub:key:subject",
            "exp": 4102444800.5,
            "nbf": 1700000000.25,
            "iat": 1700000000,
        });
        let token = sign_raw(&json!({ "alg": "EdDSA" }), &payload, &KeyPair::generate());
        let decoded = DecodedJwt::decode(&envelope(&token)).unwrap();
        assert_eq!(decoded.claims().exp, Some(4102444800));
        assert_eq!(decoded.claims().nbf, Some(1700000000));
        assert_eq!(decoded.claims().iat, Some(1700000000));
    }

    #[test]
    fn test_decode_rejects_non_numeric_dates() {
        let payload = json!({ "iss": "did:idhub:key:issuer", "exp": "tomorrow" });
        let token = sign_raw(&json!({ "alg": "EdDSA" }), &payload, &KeyPair::generate());
        assert!(matches!(
            DecodedJwt::decode(&envelope(&token)),
            Err(VerificationError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_accepts_empty_claims() {
        let token = JwtClaims::default()
            .sign("kid", &KeyPair::generate())
            .unwrap();
        let decoded = DecodedJwt::decode(&envelope(&token)).unwrap();
        assert!(decoded.claims().iss.is_none());
        assert!(decoded.claims().vc.is_none());
    }
}
