use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenService;
use crate::jwt::DEFAULT_TOKEN_TTL_MINUTES;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,

    /// Always `"bearer"`
    pub token_type: &'static str,
}

impl AuthenticationResult {
    pub const TOKEN_TYPE: &'static str = "bearer";

    fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: Self::TOKEN_TYPE,
        }
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create an authenticator signing with HS256 and the default 30 minute lifetime.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_token_service(TokenService::new(
            JwtHandler::new(jwt_secret),
            Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        ))
    }

    pub fn with_token_service(token_service: TokenService) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for `subject_id`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject_id` - User the token is issued for
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject_id: i64,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject_id)?;

        Ok(AuthenticationResult::bearer(access_token))
    }

    /// Fail a login for which no account exists.
    ///
    /// Spends one full password verification first, so an unknown account is
    /// not told apart from a wrong password by response time.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_decoy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token with the default lifetime, without checking a password.
    pub fn issue_token(&self, subject_id: i64) -> Result<String, JwtError> {
        self.token_service
            .issue(subject_id, self.token_service.default_ttl())
    }

    /// Validate a token and return the user id it was issued for.
    ///
    /// # Errors
    /// * `JwtError::Invalid` - Token is malformed, forged or expired
    pub fn validate_token(&self, token: &str) -> Result<i64, JwtError> {
        self.token_service.validate(token)
    }
}
