use time::Duration;

use common::auth::{AuthConfig, Authenticator, DEFAULT_TOKEN_TTL};
use common::prelude::{BucketRegistry, DocumentStore, Stash};

use crate::service_config::Config;

/// Main service state - owns the engine shared by all request handlers.
#[derive(Clone)]
pub struct State {
    stash: Stash,
}

impl State {
    pub fn from_config(config: &Config) -> Result<Self, StateSetupError> {
        let mut auth_config = match &config.token_key_hex {
            Some(encoded) => {
                let bytes = hex::decode(encoded)
                    .map_err(|e| StateSetupError::InvalidTokenKey(e.to_string()))?;
                let token_key: [u8; 32] = bytes
                    .try_into()
                    .map_err(|_| StateSetupError::InvalidTokenKey("key must be 32 bytes".into()))?;
                AuthConfig {
                    token_key,
                    token_ttl: DEFAULT_TOKEN_TTL,
                }
            }
            None => {
                tracing::warn!(
                    "no token key configured, generating an ephemeral one; tokens will not survive a restart"
                );
                AuthConfig::generate()
            }
        };
        auth_config.token_ttl = Duration::hours(config.token_ttl_hours);

        Ok(Self {
            stash: Stash::new(auth_config),
        })
    }

    pub fn stash(&self) -> &Stash {
        &self.stash
    }

    pub fn auth(&self) -> &Authenticator {
        self.stash.auth()
    }

    pub fn registry(&self) -> &BucketRegistry {
        self.stash.registry()
    }

    pub fn docs(&self) -> &DocumentStore {
        self.stash.docs()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("token key must be 32 hex-encoded bytes: {0}")]
    InvalidTokenKey(String),
}
