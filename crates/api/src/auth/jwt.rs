//! HS256 access tokens.
//!
//! Tokens carry a [`Claims`] payload with the user id and role. The signing
//! keys are derived from the secret once, when [`JwtKeys`] is built at
//! startup, and shared read-only afterwards.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use notekeep_core::credentials::{Identity, TokenAuthority};
use notekeep_core::error::CoreError;
use notekeep_core::roles::Role;
use notekeep_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub role: Role,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4), useful in audit logs.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes.
    pub expiry_mins: i64,
}

/// Default token expiry: seven days.
const DEFAULT_EXPIRY_MINS: i64 = 7 * 24 * 60;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `10080` |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");
        assert!(expiry_mins > 0, "JWT_EXPIRY_MINS must be positive");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Signing and verification keys derived once from [`JwtConfig`].
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    expiry_secs: i64,
}

impl JwtKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::default(), // HS256, validates exp
            expiry_secs: config.expiry_mins * 60,
        }
    }

    /// Sign a token for `user_id` with the given role.
    pub fn generate(&self, user_id: DbId, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            role,
            exp: now + self.expiry_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Validate a token's signature and expiry and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &self.validation).map(|data| data.claims)
    }
}

impl TokenAuthority for JwtKeys {
    fn sign(&self, identity: &Identity) -> Result<String, CoreError> {
        self.generate(identity.user_id, identity.role)
            .map_err(|e| CoreError::Internal(format!("Token signing failed: {e}")))
    }

    fn verify(&self, token: &str) -> Result<Identity, CoreError> {
        let claims = self.validate(token).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            CoreError::Unauthorized("Invalid or expired token".into())
        })?;
        Ok(Identity {
            user_id: claims.sub,
            role: claims.role,
        })
    }

    fn expires_in_secs(&self) -> i64 {
        self.expiry_secs
    }
}
