pub mod credential;
pub mod token;

use rand::RngCore;
use time::Duration;
use uuid::Uuid;

use crate::directory::{DirectoryError, Principal, PrincipalDirectory};

pub use token::TokenError;

/// Default token validity window.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::hours(24);

/// Signing key and validity window for session tokens.
#[derive(Clone)]
pub struct AuthConfig {
    /// 32-byte keyed-hash secret for token signatures.
    pub token_key: [u8; 32],
    /// How long minted tokens stay valid.
    pub token_ttl: Duration,
}

impl AuthConfig {
    /// Fresh random key with the default validity window. Tokens signed
    /// with a generated key die with the process.
    pub fn generate() -> Self {
        let mut token_key = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut token_key);
        Self {
            token_key,
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_key", &"[redacted]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login is already registered")]
    Conflict,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("internal auth error: {0}")]
    Internal(String),
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::Conflict => AuthError::Conflict,
            DirectoryError::Unauthorized => AuthError::Unauthorized,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

/// Issues and verifies session tokens against the principal directory.
///
/// Verification is stateless given the shared signing key. There is no
/// session table and therefore no logout or revocation; expiry is the only
/// termination path.
#[derive(Debug, Clone)]
pub struct Authenticator {
    directory: PrincipalDirectory,
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(directory: PrincipalDirectory, config: AuthConfig) -> Self {
        Self { directory, config }
    }

    /// Register a new principal. Registration implies authentication, so a
    /// token is issued immediately.
    pub fn register(
        &self,
        login: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<(Principal, String), AuthError> {
        let principal = self.directory.register(login, secret, display_name)?;
        let token = token::mint(&self.config.token_key, principal.id, self.config.token_ttl);
        Ok((principal, token))
    }

    pub fn login(&self, login: &str, secret: &str) -> Result<(Principal, String), AuthError> {
        let principal = self.directory.verify(login, secret)?;
        let token = token::mint(&self.config.token_key, principal.id, self.config.token_ttl);
        Ok((principal, token))
    }

    /// Resolve a bearer token to a principal id. Pure verification; guards
    /// every bucket and document operation.
    pub fn authenticate(&self, token: &str) -> Result<Uuid, TokenError> {
        token::verify(&self.config.token_key, token).map(|claims| claims.principal_id)
    }

    pub fn directory(&self) -> &PrincipalDirectory {
        &self.directory
    }
}
