//! Handlers for the `/categories` resource.
//!
//! Reads are public; mutations require the `admin` role. Notes keep their
//! category name through any rename or delete here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use notekeep_core::categories::validate_category;
use notekeep_core::error::CoreError;
use notekeep_db::models::category::{Category, CreateCategory, UpdateCategory};
use notekeep_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::extract::{parse_id, AppJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

const CATEGORY: &str = "Category";

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(ApiResponse::list(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let id = parse_id(&raw_id, CATEGORY)?;
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: CATEGORY })?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    validate_category(
        input.name.as_deref(),
        input.description.as_deref(),
        input.color.as_deref(),
        true,
    )?;

    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, user_id = admin.user_id, "Category created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(category))))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let id = parse_id(&raw_id, CATEGORY)?;
    validate_category(
        input.name.as_deref(),
        input.description.as_deref(),
        input.color.as_deref(),
        false,
    )?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: CATEGORY })?;

    tracing::info!(category_id = id, user_id = admin.user_id, "Category updated");
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&raw_id, CATEGORY)?;
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: CATEGORY }.into());
    }

    tracing::info!(category_id = id, user_id = admin.user_id, "Category deleted");
    Ok(Json(ApiResponse::empty("Category deleted successfully")))
}
