//! Handlers for the `/auth` resource (register, login, me).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notekeep_core::credentials::{CredentialHasher, Identity};
use notekeep_core::error::CoreError;
use notekeep_core::roles::Role;
use notekeep_core::users::{normalize_email, validate_login, validate_registration};
use notekeep_db::models::user::{CreateUser, User, UserResponse};
use notekeep_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Shared by unknown-email and wrong-password failures so neither reveals
/// whether the account exists.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication payload returned by register and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a `user`-role account and sign the caller in.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthPayload>>)> {
    validate_registration(
        input.email.as_deref(),
        input.password.as_deref(),
        input.password_confirm.as_deref(),
    )?;

    let email = normalize_email(input.email.as_deref().unwrap_or_default());
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::invalid("User with this email already exists").into());
    }

    let password = input.password.unwrap_or_default();
    let password_hash = hash_password(Arc::clone(&state.hasher), password).await?;

    // A concurrent registration that slips past the check above still fails
    // on `uq_users_email`, which maps to the same 400.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            role: Role::User,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");
    let payload = auth_payload(&state, user)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payload))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    validate_login(input.email.as_deref(), input.password.as_deref())?;

    let email = normalize_email(input.email.as_deref().unwrap_or_default());
    let password = input.password.unwrap_or_default();

    let Some(user) = UserRepo::find_by_email(&state.pool, &email).await? else {
        // Spend one hash so an unknown email costs as much as a wrong password.
        hash_password(Arc::clone(&state.hasher), password).await?;
        tracing::debug!("Login rejected: unknown email");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    };

    let valid = verify_password(
        Arc::clone(&state.hasher),
        password,
        user.password_hash.clone(),
    )
    .await?;
    if !valid {
        tracing::debug!(user_id = user.id, "Login rejected: password mismatch");
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(ApiResponse::ok(auth_payload(&state, user)?)))
}

/// GET /api/auth/me
///
/// The caller's account as currently stored.
pub async fn me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, identity.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User" })?;
    Ok(Json(ApiResponse::ok(user.into())))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn auth_payload(state: &AppState, user: User) -> AppResult<AuthPayload> {
    let token = state.tokens.sign(&Identity {
        user_id: user.id,
        role: user.role,
    })?;
    Ok(AuthPayload {
        token,
        expires_in: state.tokens.expires_in_secs(),
        user: user.into(),
    })
}

/// Hash on the blocking pool; Argon2 is CPU-bound.
pub(crate) async fn hash_password(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
) -> AppResult<String> {
    let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))??;
    Ok(hash)
}

async fn verify_password(
    hasher: Arc<dyn CredentialHasher>,
    password: String,
    hash: String,
) -> AppResult<bool> {
    let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))??;
    Ok(valid)
}
