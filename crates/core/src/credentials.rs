//! Capability interfaces for the cryptographic primitives the service uses.
//!
//! The concrete implementations (Argon2id and HS256 JWT) live in the API
//! crate; everything that only needs to hash, verify, sign, or check a token
//! depends on these traits instead.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// Who is making a request, as proven by a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: DbId,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// One-way password hashing with a per-hash random salt.
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, CoreError>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` is not a usable hash.
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CoreError>;
}

/// Stateless signed tokens carrying an [`Identity`].
pub trait TokenAuthority: Send + Sync {
    fn sign(&self, identity: &Identity) -> Result<String, CoreError>;

    /// Fails with [`CoreError::Unauthorized`] when the token is malformed,
    /// carries a bad signature, or has expired.
    fn verify(&self, token: &str) -> Result<Identity, CoreError>;

    /// Lifetime of freshly signed tokens, in seconds.
    fn expires_in_secs(&self) -> i64;
}
