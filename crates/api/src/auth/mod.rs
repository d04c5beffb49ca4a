//! Authentication primitives.
//!
//! - [`password`] -- Argon2id implementation of [`CredentialHasher`](notekeep_core::credentials::CredentialHasher).
//! - [`jwt`] -- HS256 implementation of [`TokenAuthority`].
//! - [`authenticate`] -- bearer-token check over plain request headers.

pub mod jwt;
pub mod password;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use notekeep_core::credentials::{Identity, TokenAuthority};
use notekeep_core::error::CoreError;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// `Ok(None)` when the header is absent; `Err` when it is present but is not
/// a bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, CoreError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value
        .to_str()
        .map_err(|_| CoreError::Unauthorized("Invalid Authorization header".into()))?;
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(Some)
        .ok_or_else(|| {
            CoreError::Unauthorized("Invalid Authorization format. Expected: Bearer <token>".into())
        })
}

/// Resolve the caller's identity from request headers.
///
/// Fails with `Unauthorized` when the token is absent, malformed, badly
/// signed, or expired.
pub fn authenticate(headers: &HeaderMap, tokens: &dyn TokenAuthority) -> Result<Identity, CoreError> {
    let token = bearer_token(headers)?.ok_or_else(|| {
        CoreError::Unauthorized("No token provided, authorization required".into())
    })?;
    tokens.verify(token)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;
    use notekeep_core::roles::Role;

    use super::jwt::{JwtConfig, JwtKeys};
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "header-test-secret".into(),
            expiry_mins: 5,
        })
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_not_an_error_for_bearer_parsing() {
        assert_eq!(bearer_token(&HeaderMap::new()).unwrap(), None);
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        assert_matches!(
            bearer_token(&headers("Basic dXNlcjpwYXNz")),
            Err(CoreError::Unauthorized(_))
        );
        assert_matches!(bearer_token(&headers("Bearer ")), Err(CoreError::Unauthorized(_)));
    }

    #[test]
    fn authenticate_requires_a_token() {
        assert_matches!(
            authenticate(&HeaderMap::new(), &keys()),
            Err(CoreError::Unauthorized(msg)) if msg.contains("No token provided")
        );
    }

    #[test]
    fn authenticate_returns_identity_from_valid_token() {
        let keys = keys();
        let token = keys.generate(11, Role::Admin).unwrap();
        let identity = authenticate(&headers(&format!("Bearer {token}")), &keys).unwrap();
        assert_eq!(identity.user_id, 11);
        assert!(identity.is_admin());
    }

    #[test]
    fn authenticate_rejects_garbage_token() {
        assert_matches!(
            authenticate(&headers("Bearer garbage"), &keys()),
            Err(CoreError::Unauthorized(_))
        );
    }
}
