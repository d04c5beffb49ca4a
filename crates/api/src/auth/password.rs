//! Argon2id password hashing and verification.
//!
//! Every hash gets a fresh random salt from [`OsRng`]. Hashes are stored in
//! PHC string format, so the parameters and salt travel with the hash and
//! older hashes still verify after the cost settings change.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use notekeep_core::credentials::CredentialHasher;
use notekeep_core::error::CoreError;

/// Argon2id cost settings.
#[derive(Debug, Clone, Copy)]
pub struct PasswordConfig {
    /// Number of passes over memory.
    pub time_cost: u32,
    /// Memory size in KiB.
    pub memory_kib: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            time_cost: Params::DEFAULT_T_COST,
            memory_kib: Params::DEFAULT_M_COST,
        }
    }
}

impl PasswordConfig {
    /// Load cost settings from environment variables.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `PASSWORD_HASH_TIME_COST`  | `2`     |
    /// | `PASSWORD_HASH_MEMORY_KIB` | `19456` |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let time_cost: u32 = std::env::var("PASSWORD_HASH_TIME_COST")
            .map(|v| v.parse().expect("PASSWORD_HASH_TIME_COST must be a valid u32"))
            .unwrap_or(defaults.time_cost);

        let memory_kib: u32 = std::env::var("PASSWORD_HASH_MEMORY_KIB")
            .map(|v| v.parse().expect("PASSWORD_HASH_MEMORY_KIB must be a valid u32"))
            .unwrap_or(defaults.memory_kib);

        Self {
            time_cost,
            memory_kib,
        }
    }
}

/// Argon2id implementation of [`CredentialHasher`].
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Build a hasher, rejecting parameters Argon2 cannot use.
    pub fn new(config: PasswordConfig) -> Result<Self, argon2::Error> {
        let params = Params::new(
            config.memory_kib,
            config.time_cost,
            Params::DEFAULT_P_COST,
            None,
        )?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password with a random salt, returning a PHC string.
    pub fn hash_password(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a plaintext password against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on a mismatch; `Err` only for a malformed hash.
    pub fn verify_password(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, CoreError> {
        self.hash_password(plaintext)
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {e}")))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CoreError> {
        self.verify_password(plaintext, hash)
            .map_err(|e| CoreError::Internal(format!("Password verification failed: {e}")))
    }
}
