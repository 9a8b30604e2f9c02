use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Well-formed Argon2id hash, with default parameters, that no password
/// produces. Verifying against it costs the same as a real check.
const DECOY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$2npahgZpgu3nhwrJcz7WSg$SK1l6Fs9ihHN20IFfQc7HDhpKpUkODUibj/gN5LzLho";

/// One-way credential hasher.
///
/// Produces salted Argon2id hashes in PHC string format. The PHC string carries
/// the algorithm, parameters and salt, so verification needs nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a freshly generated salt.
    ///
    /// Two calls with the same password return different strings; both verify.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejected the input or parameters
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// The digest comparison is constant-time. A hash string that does not
    /// parse yields `false`.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Run a full verification that always fails.
    ///
    /// Used when there is no stored hash to check, so the miss takes as long
    /// as a wrong password.
    pub fn verify_decoy(&self, password: &str) -> bool {
        let _ = self.verify(password, DECOY_HASH);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("pw1").expect("Failed to hash password");
        let second = hasher.hash("pw1").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("pw1", &first));
        assert!(hasher.verify("pw1", &second));
    }

    #[test]
    fn test_hash_uses_argon2id_phc_format() {
        let hash = PasswordHasher::new()
            .hash("password")
            .expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_malformed_hash_returns_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_decoy_hash_matches_default_cost() {
        let decoy = PasswordHash::new(DECOY_HASH).expect("Decoy hash must parse");
        let real_hash = PasswordHasher::new().hash("pw1").expect("Failed to hash password");
        let real = PasswordHash::new(&real_hash).expect("Failed to parse hash");

        assert_eq!(decoy.algorithm, real.algorithm);
        assert_eq!(decoy.version, real.version);
        assert_eq!(
            argon2::Params::try_from(&decoy).expect("Decoy params"),
            argon2::Params::try_from(&real).expect("Real params")
        );
    }

    #[test]
    fn test_verify_decoy_never_matches() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify_decoy(""));
        assert!(!hasher.verify_decoy("pw1"));
    }

    #[test]
    fn test_verify_empty_password_against_real_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("not-empty").expect("Failed to hash password");

        assert!(!hasher.verify("", &hash));
    }
}
