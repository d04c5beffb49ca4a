//! Role-based access control (RBAC) extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use notekeep_core::access::authorize;
use notekeep_core::credentials::Identity;
use notekeep_core::roles::Role;

use super::auth::MaybeAuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role: 401 without a valid token, 403 for other roles.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub Identity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(identity) = MaybeAuthUser::from_request_parts(parts, state).await?;
        let admin = authorize(identity.as_ref(), &[Role::Admin])?;
        Ok(RequireAdmin(*admin))
    }
}
