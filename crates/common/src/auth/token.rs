//! Self-contained session tokens.
//!
//! A token is `base64url(claims json) . base64url(keyed blake3 of the
//! encoded claims)`. Verification needs only the signing key; nothing is
//! stored server-side, so tokens cannot be revoked before expiry.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Claims carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub principal_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not verify")]
    BadSignature,
    #[error("token expired at {0}")]
    Expired(OffsetDateTime),
}

/// Mint a signed token for a principal, valid for `ttl` from now.
pub fn mint(key: &[u8; 32], principal_id: Uuid, ttl: Duration) -> String {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        principal_id,
        issued_at: now,
        expires_at: now + ttl,
    };
    let body = serde_json::to_vec(&claims).expect("claims always serialize");
    let payload = URL_SAFE_NO_PAD.encode(body);
    let sig = blake3::keyed_hash(key, payload.as_bytes());
    let sig_b64 = URL_SAFE_NO_PAD.encode(sig.as_bytes());
    format!("{payload}.{sig_b64}")
}

/// Verify a token and return its claims. Pure; touches no state beyond the
/// shared signing key.
pub fn verify(key: &[u8; 32], token: &str) -> Result<Claims, TokenError> {
    let (payload, sig_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

    let sig_bytes = URL_SAFE_NO_PAD
        .decode(sig_b64)
        .map_err(|_| TokenError::Malformed)?;
    let sig: [u8; 32] = sig_bytes.try_into().map_err(|_| TokenError::Malformed)?;
    let expected = blake3::keyed_hash(key, payload.as_bytes());
    // blake3::Hash equality is constant-time
    if expected != blake3::Hash::from(sig) {
        return Err(TokenError::BadSignature);
    }

    let body = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    let claims: Claims = serde_json::from_slice(&body).map_err(|_| TokenError::Malformed)?;
    if claims.expires_at <= OffsetDateTime::now_utc() {
        return Err(TokenError::Expired(claims.expires_at));
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn mint_then_verify() {
        let id = Uuid::new_v4();
        let token = mint(&KEY, id, Duration::hours(24));
        let claims = verify(&KEY, &token).unwrap();
        assert_eq!(claims.principal_id, id);
        assert!(claims.expires_at > claims.issued_at);
    }

    #[test]
    fn wrong_key_is_rejected() {
        let token = mint(&KEY, Uuid::new_v4(), Duration::hours(1));
        let other = [8u8; 32];
        assert_eq!(verify(&other, &token), Err(TokenError::BadSignature));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = mint(&KEY, Uuid::new_v4(), Duration::hours(1));
        let mut tampered = token.clone();
        // flip a character in the payload half
        tampered.replace_range(0..1, if token.starts_with('A') { "B" } else { "A" });
        assert!(matches!(
            verify(&KEY, &tampered),
            Err(TokenError::BadSignature) | Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = mint(&KEY, Uuid::new_v4(), Duration::hours(-1));
        assert!(matches!(verify(&KEY, &token), Err(TokenError::Expired(_))));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(verify(&KEY, "not a token"), Err(TokenError::Malformed));
        assert_eq!(verify(&KEY, "a.b"), Err(TokenError::Malformed));
    }
}
