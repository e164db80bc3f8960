use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use crate::error::{AuthError, AuthResult};
use crate::token::TokenKey;

/// Default token lifetime: one hour.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// A stored credential.
///
/// The reference behavior compares plaintext; that comparison is a known
/// weakness and lives only here, so a salted-hash scheme can replace it
/// without touching the registry API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Check a supplied credential against the stored one.
    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(<redacted>)")
    }
}

/// Process-lifetime user registry and token issuer.
///
/// Users are held in a `HashMap` behind a `RwLock`; nothing persists across
/// restarts. Token verification trusts the signed claims and never checks
/// that the user still exists.
pub struct IdentityRegistry {
    users: RwLock<HashMap<String, Credential>>,
    key: TokenKey,
    token_ttl_secs: u64,
}

impl IdentityRegistry {
    /// Create a registry minting tokens with the default one-hour TTL.
    pub fn new(key: TokenKey) -> Self {
        Self::with_ttl(key, DEFAULT_TOKEN_TTL_SECS)
    }

    pub fn with_ttl(key: TokenKey, token_ttl_secs: u64) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            key,
            token_ttl_secs,
        }
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nobody has registered yet.
    pub fn is_empty(&self) -> bool {
        self.users.read().expect("lock poisoned").is_empty()
    }

    /// Register a new user. No credential-strength validation.
    pub fn register(&self, username: &str, credential: &str) -> AuthResult<()> {
        let mut users = self.users.write().expect("lock poisoned");
        if users.contains_key(username) {
            return Err(AuthError::DuplicateUser(username.to_string()));
        }
        users.insert(username.to_string(), Credential::new(credential));
        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Exchange a username + credential pair for a signed session token.
    pub fn login(&self, username: &str, credential: &str) -> AuthResult<String> {
        let users = self.users.read().expect("lock poisoned");
        match users.get(username) {
            Some(stored) if stored.matches(credential) => {
                self.key.mint(username, self.token_ttl_secs, Utc::now())
            }
            _ => {
                tracing::warn!(username, "login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Verify a presented token and return the bound username.
    ///
    /// `None` means the caller supplied no token at all, which is reported
    /// distinctly from a malformed or expired one.
    pub fn verify(&self, token: Option<&str>) -> AuthResult<String> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.key.verify(token, Utc::now())
    }
}

impl std::fmt::Debug for IdentityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityRegistry")
            .field("user_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> IdentityRegistry {
        IdentityRegistry::new(TokenKey::from_secret("test secret"))
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    #[test]
    fn register_then_login() {
        let registry = registry();
        registry.register("bob", "pw1").unwrap();
        let token = registry.login("bob", "pw1").unwrap();
        assert_eq!(registry.verify(Some(&token)).unwrap(), "bob");
    }

    #[test]
    fn duplicate_register_fails() {
        let registry = registry();
        registry.register("bob", "pw1").unwrap();
        let err = registry.register("bob", "pw2").unwrap_err();
        assert_eq!(err, AuthError::DuplicateUser("bob".into()));
        // The original credential still wins.
        assert!(registry.login("bob", "pw2").is_err());
        assert!(registry.login("bob", "pw1").is_ok());
    }

    #[test]
    fn len_tracks_registrations() {
        let registry = registry();
        assert!(registry.is_empty());
        registry.register("a", "x").unwrap();
        registry.register("b", "y").unwrap();
        assert_eq!(registry.len(), 2);
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    #[test]
    fn login_wrong_password() {
        let registry = registry();
        registry.register("bob", "pw1").unwrap();
        assert_eq!(
            registry.login("bob", "wrong").unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn login_unknown_user() {
        assert_eq!(
            registry().login("ghost", "pw").unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    // -----------------------------------------------------------------------
    // Verify
    // -----------------------------------------------------------------------

    #[test]
    fn verify_without_token_is_missing() {
        assert_eq!(registry().verify(None).unwrap_err(), AuthError::MissingToken);
    }

    #[test]
    fn verify_garbage_is_invalid() {
        assert_eq!(
            registry().verify(Some("not-a-token")).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn verify_trusts_claims_without_user_lookup() {
        // Token stays valid even though this registry never saw the user;
        // verification is a pure function of (token, key, now).
        let key = TokenKey::from_secret("shared");
        let token = key.mint("alice", 60, Utc::now()).unwrap();
        let registry = IdentityRegistry::new(TokenKey::from_secret("shared"));
        assert_eq!(registry.verify(Some(&token)).unwrap(), "alice");
    }

    #[test]
    fn tokens_from_another_secret_rejected() {
        let registry = registry();
        let foreign = TokenKey::from_secret("other").mint("bob", 60, Utc::now()).unwrap();
        assert_eq!(
            registry.verify(Some(&foreign)).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn concurrent_registration_is_serialized() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.register(&format!("user{i}"), "pw").is_ok())
            })
            .collect();
        for h in handles {
            assert!(h.join().expect("thread should not panic"));
        }
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn debug_redacts_credentials() {
        let cred = Credential::new("hunter2");
        let debug = format!("{cred:?}");
        assert!(debug.contains("redacted"));
        assert!(!debug.contains("hunter2"));
    }
}
