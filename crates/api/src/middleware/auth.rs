//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use notekeep_core::credentials::Identity;

use crate::auth::authenticate;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from a Bearer token.
///
/// ```ignore
/// async fn my_handler(AuthUser(identity): AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = identity.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = authenticate(&parts.headers, state.tokens.as_ref())?;
        Ok(AuthUser(identity))
    }
}

/// Caller identity when a valid token is present, `None` otherwise.
///
/// Never rejects: a missing, malformed, or expired token all yield an
/// anonymous caller, and the handler decides whether that is acceptable.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            authenticate(&parts.headers, state.tokens.as_ref()).ok(),
        ))
    }
}
