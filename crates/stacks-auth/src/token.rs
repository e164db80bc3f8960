use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Key-derivation context for session-token MACs. Versioned so a future
/// token format can rotate keys without changing the configured secret.
const KEY_CONTEXT: &str = "stacks session token v1";

/// Claims carried inside a session token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The username the token is bound to.
    pub sub: String,
    /// Expiry as unix seconds.
    pub exp: i64,
}

/// MAC key for minting and verifying session tokens.
///
/// The wire format is `hex(claims_json) . hex(mac)` with
/// `mac = blake3::keyed_hash(key, claims_json)`. Verification recomputes
/// the MAC and compares (constant time via `blake3::Hash` equality), then
/// checks expiry. Nothing is looked up server-side.
#[derive(Clone)]
pub struct TokenKey([u8; 32]);

impl TokenKey {
    /// Derive the MAC key from a configured secret string.
    pub fn from_secret(secret: &str) -> Self {
        Self(blake3::derive_key(KEY_CONTEXT, secret.as_bytes()))
    }

    /// Mint a token binding `username` until `now + ttl_secs`.
    pub fn mint(&self, username: &str, ttl_secs: u64, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = Claims {
            sub: username.to_string(),
            exp: now.timestamp() + ttl_secs as i64,
        };
        let payload =
            serde_json::to_vec(&claims).map_err(|e| AuthError::Encoding(e.to_string()))?;
        let mac = blake3::keyed_hash(&self.0, &payload);
        Ok(format!("{}.{}", hex::encode(&payload), hex::encode(mac.as_bytes())))
    }

    /// Verify a token and return the bound username.
    ///
    /// Malformed or forged tokens are [`AuthError::InvalidToken`]; a valid
    /// signature past its expiry is [`AuthError::ExpiredToken`].
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let (payload_hex, mac_hex) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
        let payload = hex::decode(payload_hex).map_err(|_| AuthError::InvalidToken)?;
        let mac_bytes: [u8; 32] = hex::decode(mac_hex)
            .map_err(|_| AuthError::InvalidToken)?
            .try_into()
            .map_err(|_| AuthError::InvalidToken)?;

        let expected = blake3::keyed_hash(&self.0, &payload);
        if expected != blake3::Hash::from(mac_bytes) {
            return Err(AuthError::InvalidToken);
        }

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;
        if claims.exp < now.timestamp() {
            return Err(AuthError::ExpiredToken);
        }
        Ok(claims.sub)
    }
}

impl std::fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TokenKey(<redacted>)")
    }
}
