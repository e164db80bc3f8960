//! Identity and session tokens for the stacks service.
//!
//! [`IdentityRegistry`] owns the registered users for the lifetime of the
//! process and gates review mutation: `register` creates a user, `login`
//! mints a signed token, `verify` turns a presented token back into a
//! username.
//!
//! Tokens are stateless. A token is `hex(claims) . hex(mac)` where the MAC
//! is a keyed BLAKE3 hash of the claims under a key derived from the
//! configured secret. Verification is a pure function of (token, key,
//! current time); no server-side session table exists and expiry is the
//! only invalidation.

pub mod error;
pub mod registry;
pub mod token;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{AuthError, AuthResult};
pub use registry::{Credential, IdentityRegistry};
pub use token::{Claims, TokenKey};
