use thiserror::Error;

use crate::user::models::Role;

/// Outcome of a rejected access attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// No usable credential: header absent, token invalid or expired, or the
    /// token's subject no longer exists.
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Requires the {required} role")]
    Forbidden { required: Role },

    #[error("Identity lookup failed: {0}")]
    Storage(String),
}
