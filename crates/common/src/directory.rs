use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::credential::{self, CredentialError};

/// A registered identity.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub login: String,
    pub display_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A principal plus its stored credential hash. The hash never leaves the
/// directory.
#[derive(Debug, Clone)]
struct PrincipalRecord {
    principal: Principal,
    credential_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("login is already registered")]
    Conflict,
    #[error("invalid login or secret")]
    Unauthorized,
    #[error("no principal with id {0}")]
    NotFound(Uuid),
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),
    #[error("directory lock poisoned")]
    LockPoisoned,
}

/// Directory of registered principals, keyed by login.
#[derive(Debug, Clone, Default)]
pub struct PrincipalDirectory {
    inner: Arc<RwLock<DirectoryInner>>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    by_login: HashMap<String, Uuid>,
    records: HashMap<Uuid, PrincipalRecord>,
}

impl PrincipalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new principal. The uniqueness check and the insert happen
    /// under one write lock, so of two concurrent registrations for the same
    /// login exactly one wins.
    pub fn register(
        &self,
        login: &str,
        secret: &str,
        display_name: &str,
    ) -> Result<Principal, DirectoryError> {
        // Hash outside the lock; argon2 is slow on purpose.
        let credential_hash = credential::hash(secret)?;

        let mut inner = self.inner.write().map_err(|_| DirectoryError::LockPoisoned)?;
        if inner.by_login.contains_key(login) {
            return Err(DirectoryError::Conflict);
        }

        let principal = Principal {
            id: Uuid::new_v4(),
            login: login.to_string(),
            display_name: display_name.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.by_login.insert(login.to_string(), principal.id);
        inner.records.insert(
            principal.id,
            PrincipalRecord {
                principal: principal.clone(),
                credential_hash,
            },
        );
        tracing::debug!(login, id = %principal.id, "registered principal");
        Ok(principal)
    }

    /// Check a login/secret pair. Unknown logins and wrong secrets are
    /// indistinguishable to the caller.
    pub fn verify(&self, login: &str, secret: &str) -> Result<Principal, DirectoryError> {
        let record = {
            let inner = self.inner.read().map_err(|_| DirectoryError::LockPoisoned)?;
            inner
                .by_login
                .get(login)
                .and_then(|id| inner.records.get(id))
                .cloned()
        };
        let record = record.ok_or(DirectoryError::Unauthorized)?;
        if credential::verify(secret, &record.credential_hash)? {
            Ok(record.principal)
        } else {
            Err(DirectoryError::Unauthorized)
        }
    }

    pub fn get(&self, id: Uuid) -> Result<Principal, DirectoryError> {
        let inner = self.inner.read().map_err(|_| DirectoryError::LockPoisoned)?;
        inner
            .records
            .get(&id)
            .map(|r| r.principal.clone())
            .ok_or(DirectoryError::NotFound(id))
    }
}
