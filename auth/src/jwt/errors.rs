use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token is invalid: {0}")]
    Invalid(InvalidToken),
}

/// Why a presented token was rejected.
///
/// Every variant means the same thing to a caller (the token grants nothing);
/// the distinction exists for logging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidToken {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("signature does not match")]
    BadSignature,

    #[error("token is expired")]
    Expired,

    #[error("missing required claim: {0}")]
    MissingClaim(String),

    #[error("subject is not a user id: {0}")]
    InvalidSubject(String),
}

impl From<InvalidToken> for JwtError {
    fn from(reason: InvalidToken) -> Self {
        JwtError::Invalid(reason)
    }
}
