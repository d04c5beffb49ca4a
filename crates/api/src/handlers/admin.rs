//! Handlers for the `/admin` resource: dashboard, users, and all notes.
//!
//! All handlers require the `admin` role via [`RequireAdmin`]. Catalog
//! mutations under `/admin/tags` and `/admin/categories` reuse the
//! [`tags`](super::tags) and [`categories`](super::categories) handlers.

use axum::extract::{Path, State};
use axum::Json;
use notekeep_core::error::CoreError;
use notekeep_core::roles::Role;
use notekeep_core::users::{normalize_email, validate_email_update};
use notekeep_core::validation::FieldErrors;
use notekeep_db::models::dashboard::DashboardStats;
use notekeep_db::models::note::AdminNote;
use notekeep_db::models::user::{UpdateUser, UserResponse};
use notekeep_db::repositories::{DashboardRepo, NoteRepo, UserRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::{parse_id, AppJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

/// Number of recent users and notes shown on the dashboard.
const DASHBOARD_RECENT_LIMIT: i64 = 5;

const USER: &str = "User";
const NOTE: &str = "Note";

/// Request body for `PUT /admin/users/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    /// Validate every provided field and build the store update.
    fn into_update(self) -> Result<UpdateUser, CoreError> {
        let mut errors = FieldErrors::new();

        let email = self.email.map(|email| {
            if let Err(CoreError::Validation(messages)) = validate_email_update(&email) {
                messages.into_iter().for_each(|m| errors.push(m));
            }
            normalize_email(&email)
        });

        let role = match self.role.as_deref().map(str::parse::<Role>) {
            Some(Ok(role)) => Some(role),
            Some(Err(CoreError::Validation(messages))) => {
                messages.into_iter().for_each(|m| errors.push(m));
                None
            }
            Some(Err(other)) => return Err(other),
            None => None,
        };

        errors.finish()?;
        Ok(UpdateUser { email, role })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// GET /api/admin/dashboard
///
/// Collection counts come from a single statement; the recent lists are
/// fetched concurrently alongside it.
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let (stats, recent_users, recent_notes) = tokio::try_join!(
        DashboardRepo::counts(&state.pool),
        UserRepo::list_recent(&state.pool, DASHBOARD_RECENT_LIMIT),
        NoteRepo::list_recent_with_owner(&state.pool, DASHBOARD_RECENT_LIMIT),
    )?;

    Ok(Json(ApiResponse::ok(DashboardStats {
        stats,
        recent_users: recent_users.into_iter().map(UserResponse::from).collect(),
        recent_notes,
    })))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::list(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let id = parse_id(&raw_id, USER)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: USER })?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/admin/users/{id}
///
/// Changes `email` and/or `role`. An unknown role is rejected rather than
/// ignored.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let id = parse_id(&raw_id, USER)?;
    let update = input.into_update()?;

    let user = UserRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::NotFound { entity: USER })?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, role = %user.role, "User updated");
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/admin/users/{id}
///
/// Removes the user and every note they own. An admin cannot delete their
/// own account.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&raw_id, USER)?;
    if id == admin.user_id {
        return Err(CoreError::invalid("Cannot delete yourself").into());
    }

    let notes_deleted = UserRepo::delete_with_notes(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: USER })?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, notes_deleted, "User deleted");
    Ok(Json(ApiResponse::empty("User deleted successfully")))
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// GET /api/admin/notes
///
/// Every user's notes, newest first, with owner emails.
pub async fn list_all_notes(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<Vec<AdminNote>>>> {
    let notes = NoteRepo::list_all_with_owner(&state.pool).await?;
    Ok(Json(ApiResponse::list(notes)))
}

/// DELETE /api/admin/notes/{id}
pub async fn delete_any_note(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&raw_id, NOTE)?;
    if !NoteRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: NOTE }.into());
    }

    tracing::info!(note_id = id, user_id = admin.user_id, "Note deleted by admin");
    Ok(Json(ApiResponse::empty("Note deleted successfully")))
}
