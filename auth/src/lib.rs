//! Authentication utilities library
//!
//! Provides the credential and session-token primitives used by the portal service:
//! - Password hashing (Argon2id)
//! - Stateless JWT session tokens with a fixed lifetime
//! - Login coordination (verify a password, issue a bearer token)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(
//!     JwtHandler::new(b"secret_key_at_least_32_bytes_long!"),
//!     Duration::minutes(30),
//! );
//! let token = tokens.issue(42, tokens.default_ttl()).unwrap();
//! assert_eq!(tokens.validate(&token).unwrap(), 42);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 7).unwrap();
//! assert_eq!(result.token_type, "bearer");
//!
//! // Validate token
//! assert_eq!(auth.validate_token(&result.access_token).unwrap(), 7);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::InvalidToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenService;
pub use jwt::DEFAULT_TOKEN_TTL_MINUTES;
pub use password::PasswordError;
pub use password::PasswordHasher;
