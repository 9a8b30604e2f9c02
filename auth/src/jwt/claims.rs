use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::InvalidToken;

/// Session token claims.
///
/// Carries only what the service needs to resolve a session: the subject
/// (user id, as a decimal string per RFC 7519) and the issue/expiry instants.
///
/// `exp` is whole seconds as RFC 7519 readers expect. `exp_nanos` holds the
/// sub-second part so the expiry instant is exactly `issued_at + ttl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp, seconds part)
    pub exp: i64,

    /// Sub-second part of the expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_nanos: Option<u32>,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user session.
    ///
    /// # Arguments
    /// * `subject_id` - User identifier
    /// * `issued_at` - Issue instant
    /// * `ttl` - Lifetime; the token expires at `issued_at + ttl`
    pub fn for_subject(subject_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        let expiration = issued_at + ttl;

        let exp_nanos = expiration.timestamp_subsec_nanos();

        Self {
            sub: subject_id.to_string(),
            exp: expiration.timestamp(),
            exp_nanos: (exp_nanos > 0).then_some(exp_nanos),
            iat: issued_at.timestamp(),
        }
    }

    /// Parse the subject back into a user id.
    ///
    /// # Errors
    /// * `InvalidSubject` - `sub` is not a decimal integer
    pub fn subject_id(&self) -> Result<i64, InvalidToken> {
        self.sub
            .parse::<i64>()
            .map_err(|_| InvalidToken::InvalidSubject(self.sub.clone()))
    }

    /// The instant the token stops being valid. `None` if out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, self.exp_nanos.unwrap_or(0))
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at its expiry instant, not one second after.
    /// An unrepresentable expiry counts as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |expiry| now >= expiry)
    }
}
