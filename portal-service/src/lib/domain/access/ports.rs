use async_trait::async_trait;

use crate::access::errors::AccessError;
use crate::user::models::User;

/// Port for resolving a presented bearer token to a user.
#[async_trait]
pub trait AccessGatePort: Send + Sync + 'static {
    /// Validate `token` and load the user it was issued for.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token (without the `Bearer ` prefix)
    ///
    /// # Returns
    /// The user with its resolved role
    ///
    /// # Errors
    /// * `Unauthenticated` - Token invalid or expired, or its user was deleted
    /// * `Storage` - The identity lookup itself failed
    async fn authenticate(&self, token: &str) -> Result<User, AccessError>;
}
