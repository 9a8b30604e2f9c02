use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::access::errors::AccessError;
use crate::access::ports::AccessGatePort;
use crate::user::models::Role;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Authorization gate backed by the token service and the user store.
///
/// Holds no mutable state; one identity lookup per call.
pub struct AccessGate<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AccessGate<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AccessGatePort for AccessGate<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, token: &str) -> Result<User, AccessError> {
        let subject = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            AccessError::Unauthenticated
        })?;

        let user = self
            .repository
            .find_by_id(UserId(subject))
            .await
            .map_err(|e| {
                tracing::error!(user_id = subject, error = %e, "Identity lookup failed");
                AccessError::Storage(e.to_string())
            })?;

        user.ok_or_else(|| {
            tracing::warn!(user_id = subject, "Token subject no longer exists");
            AccessError::Unauthenticated
        })
    }
}

/// Pass `user` through when it holds `role`.
///
/// # Errors
/// * `Forbidden` - The user has any other role
pub fn require_role(user: User, role: Role) -> Result<User, AccessError> {
    if user.has_role(role) {
        Ok(user)
    } else {
        Err(AccessError::Forbidden { required: role })
    }
}
