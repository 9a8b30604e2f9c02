use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::InvalidToken;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Lifetime of a session token when none is configured.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Issues and validates stateless session tokens.
///
/// A token is valid while its signature checks out against the configured
/// secret and the current instant is before its `exp`. Nothing is stored, so
/// a token cannot be revoked before it expires.
pub struct TokenService {
    handler: JwtHandler,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(handler: JwtHandler, default_ttl: Duration) -> Self {
        Self {
            handler,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject_id` valid for `ttl` from now.
    pub fn issue(&self, subject_id: i64, ttl: Duration) -> Result<String, JwtError> {
        self.issue_at(subject_id, ttl, Utc::now())
    }

    /// Issue a token with an explicit issue instant.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_at(
        &self,
        subject_id: i64,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.handler
            .encode(&Claims::for_subject(subject_id, issued_at, ttl))
    }

    /// Validate a token against the current time and return its subject.
    pub fn validate(&self, token: &str) -> Result<i64, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as of `now` and return its subject.
    ///
    /// # Errors
    /// * `Invalid(_)` - Malformed, wrongly signed, expired, or without a
    ///   numeric subject
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<i64, JwtError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.is_expired(now) {
            return Err(InvalidToken::Expired.into());
        }

        Ok(claims.subject_id()?)
    }
}
