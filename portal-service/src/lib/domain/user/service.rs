use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;

use crate::domain::user::models::AdminAccount;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Make sure every role row and the default admin account exist.
    ///
    /// Safe to call on every startup: existing rows are left untouched, and an
    /// admin created concurrently by another instance counts as success.
    ///
    /// # Errors
    /// * `Hashing` - Admin password could not be hashed
    /// * `DatabaseError` - Database operation failed
    pub async fn ensure_defaults(&self, admin: &AdminAccount) -> Result<(), UserError> {
        self.repository.ensure_roles(&Role::ALL).await?;

        if self.repository.find_by_email(&admin.email).await?.is_some() {
            tracing::debug!(email = %admin.email, "Default admin account already present");
            return Ok(());
        }

        let password_hash = self.hash_password(&admin.password)?;
        let new_admin = NewUser {
            email: admin.email.clone(),
            password_hash,
            role: Role::Admin,
        };

        match self.repository.create(new_admin).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, email = %user.email, "Default admin account created");
                Ok(())
            }
            Err(UserError::EmailAlreadyExists(_)) => {
                tracing::debug!(email = %admin.email, "Default admin account created concurrently");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| UserError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if command.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                password_hash,
                role: Role::User,
            })
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticationResult, UserError> {
        let Ok(email) = EmailAddress::new(email.to_string()) else {
            return Err(login_error(self.authenticator.reject_unknown(password)));
        };

        let Some(user) = self.repository.find_by_email(&email).await? else {
            return Err(login_error(self.authenticator.reject_unknown(password)));
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id.0)
            .map_err(login_error)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(result)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

fn login_error(err: AuthenticationError) -> UserError {
    match err {
        AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
        AuthenticationError::JwtError(e) => UserError::Token(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::*;

    use super::*;
    use crate::user::ports::mocks::MockTestUserRepository;

    const SECRET: &[u8] = b"user_service_test_secret_32_bytes_long";

    fn service(repository: MockTestUserRepository) -> UserService<MockTestUserRepository> {
        UserService::new(Arc::new(repository), Arc::new(Authenticator::new(SECRET)))
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::new(raw.to_string()).unwrap()
    }

    fn stored_user(id: i64, address: &str, password: &str, role: Role) -> User {
        User {
            id: UserId(id),
            email: email(address),
            password_hash: Authenticator::new(SECRET).hash_password(password).unwrap(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "a@b.com"
                    && user.role == Role::User
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(1),
                    email: user.email,
                    password_hash: user.password_hash,
                    role: user.role,
                })
            });

        let user = service(repository)
            .register(RegisterUserCommand::new(email("a@b.com"), "pw1".to_string()))
            .await
            .unwrap();

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.role, Role::User);
        assert!(auth::PasswordHasher::new().verify("pw1", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "a@b.com", "pw1", Role::User))));
        repository.expect_create().times(0);

        let result = service(repository)
            .register(RegisterUserCommand::new(email("a@b.com"), "pw2".to_string()))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_empty_password() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);
        repository.expect_create().times(0);

        let result = service(repository)
            .register(RegisterUserCommand::new(email("a@b.com"), String::new()))
            .await;

        assert!(matches!(result, Err(UserError::EmptyPassword)));
    }

    #[tokio::test]
    async fn test_register_role_missing() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::RoleMissing(user.role)));

        let result = service(repository)
            .register(RegisterUserCommand::new(email("a@b.com"), "pw1".to_string()))
            .await;

        assert!(matches!(result, Err(UserError::RoleMissing(Role::User))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user(42, "a@b.com", "pw1", Role::User);

        repository
            .expect_find_by_email()
            .withf(|e| e.as_str() == "a@b.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repository).login("a@b.com", "pw1").await.unwrap();

        assert_eq!(result.token_type, "bearer");
        let subject = Authenticator::new(SECRET)
            .validate_token(&result.access_token)
            .unwrap();
        assert_eq!(subject, 42);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user(42, "a@b.com", "pw1", Role::User);

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repository).login("a@b.com", "wrong").await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_indistinguishable() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).login("nobody@b.com", "pw1").await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unparsable_email() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);

        let result = service(repository).login("not-an-email", "pw1").await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .with(eq(UserId(9)))
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository).get_user(UserId(9)).await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ensure_defaults_creates_admin() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_ensure_roles()
            .withf(|roles| roles.contains(&Role::User) && roles.contains(&Role::Admin))
            .times(1)
            .returning(|_| Ok(()));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| user.role == Role::Admin && user.email.as_str() == "admin@example.com")
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: UserId(1),
                    email: user.email,
                    password_hash: user.password_hash,
                    role: user.role,
                })
            });

        let admin = AdminAccount {
            email: email("admin@example.com"),
            password: "admin123".to_string(),
        };

        assert!(service(repository).ensure_defaults(&admin).await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_defaults_is_noop_when_admin_exists() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_ensure_roles()
            .times(1)
            .returning(|_| Ok(()));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user(1, "admin@example.com", "admin123", Role::Admin))));
        repository.expect_create().times(0);

        let admin = AdminAccount {
            email: email("admin@example.com"),
            password: "admin123".to_string(),
        };

        assert!(service(repository).ensure_defaults(&admin).await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_defaults_tolerates_concurrent_creation() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_ensure_roles()
            .times(1)
            .returning(|_| Ok(()));
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let admin = AdminAccount {
            email: email("admin@example.com"),
            password: "admin123".to_string(),
        };

        assert!(service(repository).ensure_defaults(&admin).await.is_ok());
    }
}
