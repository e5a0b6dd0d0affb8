//! Salted one-way credential hashing.
//!
//! Secrets are stored as argon2id PHC strings and compared by hash only.
//! Plaintext never touches the directory.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to hash credential: {0}")]
    Hash(String),
    #[error("stored credential hash is malformed: {0}")]
    Malformed(String),
}

/// Hash a secret with argon2id and a fresh random salt.
pub fn hash(secret: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Check a secret against a stored PHC hash. A mismatch is `Ok(false)`, not
/// an error.
pub fn verify(secret: &str, stored: &str) -> Result<bool, CredentialError> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| CredentialError::Malformed(e.to_string()))?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::Malformed(e.to_string())),
    }
}
