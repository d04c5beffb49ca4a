//! Handlers for the `/tags` resource.
//!
//! Reads are public. Mutations require the `admin` role and are mounted
//! under both `/tags` and `/admin/tags`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use notekeep_core::error::CoreError;
use notekeep_core::tags::validate_tag;
use notekeep_db::models::tag::{CreateTag, Tag, UpdateTag};
use notekeep_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::extract::{parse_id, AppJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

const TAG: &str = "Tag";

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Tag>>>> {
    let tags = TagRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::list(tags)))
}

/// GET /api/tags/{id}
pub async fn get_tag(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Tag>>> {
    let id = parse_id(&raw_id, TAG)?;
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: TAG })?;
    Ok(Json(ApiResponse::ok(tag)))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateTag>,
) -> AppResult<(StatusCode, Json<ApiResponse<Tag>>)> {
    validate_tag(input.name.as_deref(), input.color.as_deref(), true)?;

    let tag = TagRepo::create(
        &state.pool,
        input.name.as_deref().unwrap_or_default(),
        input.color.as_deref(),
    )
    .await?;

    tracing::info!(tag_id = tag.id, user_id = admin.user_id, "Tag created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(tag))))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateTag>,
) -> AppResult<Json<ApiResponse<Tag>>> {
    let id = parse_id(&raw_id, TAG)?;
    validate_tag(input.name.as_deref(), input.color.as_deref(), false)?;

    let tag = TagRepo::update(&state.pool, id, input.name.as_deref(), input.color.as_deref())
        .await?
        .ok_or(CoreError::NotFound { entity: TAG })?;

    tracing::info!(tag_id = id, user_id = admin.user_id, "Tag updated");
    Ok(Json(ApiResponse::ok(tag)))
}

/// DELETE /api/tags/{id}
///
/// The tag is detached from every note that carried it; the notes remain.
pub async fn delete_tag(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&raw_id, TAG)?;
    if !TagRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: TAG }.into());
    }

    tracing::info!(tag_id = id, user_id = admin.user_id, "Tag deleted");
    Ok(Json(ApiResponse::empty("Tag deleted successfully")))
}
