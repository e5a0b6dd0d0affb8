//! Shared test utilities for engine integration tests
#![allow(dead_code)]

use ::common::auth::AuthConfig;
use ::common::prelude::*;
use uuid::Uuid;

/// Fresh engine with a random signing key.
pub fn setup_stash() -> Stash {
    Stash::new(AuthConfig::generate())
}

/// Register a principal with a fixed secret and return it with its token.
pub fn register(stash: &Stash, login: &str) -> (Principal, String) {
    stash
        .auth()
        .register(login, "hunter2", "Test User")
        .unwrap()
}

/// Register a principal and create one bucket for it.
pub fn setup_bucket(stash: &Stash, login: &str, bucket_name: &str) -> (Principal, Bucket) {
    let (principal, _token) = register(stash, login);
    let bucket = stash
        .create_bucket(principal.id, bucket_name, None, None)
        .unwrap();
    (principal, bucket)
}

/// A principal id no directory has ever seen.
pub fn stranger() -> Uuid {
    Uuid::new_v4()
}
