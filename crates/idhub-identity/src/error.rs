/// Identity-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("DID not found: {0}")]
    DidNotFound(String),

    #[error("invalid DID format: {0}")]
    InvalidDid(String),

    #[error("duplicate DID: {0}")]
    DuplicateDid(String),

    #[error("DID resolution failed: {0}")]
    DidResolution(String),
}
