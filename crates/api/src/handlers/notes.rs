//! Handlers for the `/notes` resource.
//!
//! Reads follow the configured [`NoteAccessMode`](notekeep_core::access::NoteAccessMode):
//! an authenticated caller only ever sees their own notes, and a foreign
//! note looks exactly like a missing one. Mutations always require a token
//! and answer 403 for a note owned by someone else.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use notekeep_core::error::CoreError;
use notekeep_core::notes::{validate_new_note, validate_note_update};
use notekeep_core::types::DbId;
use notekeep_db::models::note::{CreateNote, Note, NoteListParams, UpdateNote};
use notekeep_db::repositories::{NoteRepo, TagRepo};

use crate::error::AppResult;
use crate::extract::{parse_id, AppJson, AppQuery};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::{ApiResponse, Empty};
use crate::state::AppState;

const NOTE: &str = "Note";

/// GET /api/notes
///
/// Filters: `category`, `isPinned`, `tag`, `search`. An unknown tag yields an
/// empty list, not an error.
pub async fn list_notes(
    State(state): State<AppState>,
    MaybeAuthUser(identity): MaybeAuthUser,
    AppQuery(params): AppQuery<NoteListParams>,
) -> AppResult<Json<ApiResponse<Vec<Note>>>> {
    let owner = state.config.note_access.read_scope(identity.as_ref())?;

    let tag_id = match params.tag.as_deref().map(str::trim) {
        Some(tag) if !tag.is_empty() => match TagRepo::find_by_name(&state.pool, tag).await? {
            Some(found) => Some(found.id),
            None => return Ok(Json(ApiResponse::list(Vec::new()))),
        },
        _ => None,
    };

    let notes = NoteRepo::list(&state.pool, &params.to_filter(owner, tag_id)).await?;
    Ok(Json(ApiResponse::list(notes)))
}

/// POST /api/notes
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    AppJson(input): AppJson<CreateNote>,
) -> AppResult<(StatusCode, Json<ApiResponse<Note>>)> {
    validate_new_note(&input.fields())?;

    // A token can outlive its account; nothing is written for a deleted owner.
    let note = NoteRepo::create(&state.pool, identity.user_id, &input)
        .await?
        .ok_or_else(|| CoreError::Unauthorized("User no longer exists".into()))?;

    tracing::info!(note_id = note.id, user_id = identity.user_id, "Note created");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(note))))
}

/// GET /api/notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    MaybeAuthUser(identity): MaybeAuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Note>>> {
    let owner = state.config.note_access.read_scope(identity.as_ref())?;
    let id = parse_id(&raw_id, NOTE)?;

    let note = NoteRepo::find_by_id(&state.pool, id, owner)
        .await?
        .ok_or(CoreError::NotFound { entity: NOTE })?;
    Ok(Json(ApiResponse::ok(note)))
}

/// PUT /api/notes/{id}
///
/// Applies only the provided fields. `tags` replaces the whole set when
/// present (`[]` clears it) and is left alone when omitted.
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(raw_id): Path<String>,
    AppJson(input): AppJson<UpdateNote>,
) -> AppResult<Json<ApiResponse<Note>>> {
    let id = parse_id(&raw_id, NOTE)?;
    validate_note_update(&input.fields())?;
    ensure_owner(&state, id, identity.user_id, "You can only update your own notes").await?;

    let note = NoteRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: NOTE })?;

    tracing::info!(note_id = id, user_id = identity.user_id, "Note updated");
    Ok(Json(ApiResponse::ok(note)))
}

/// DELETE /api/notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let id = parse_id(&raw_id, NOTE)?;
    ensure_owner(&state, id, identity.user_id, "You can only delete your own notes").await?;

    if !NoteRepo::delete(&state.pool, id).await? {
        return Err(CoreError::NotFound { entity: NOTE }.into());
    }

    tracing::info!(note_id = id, user_id = identity.user_id, "Note deleted");
    Ok(Json(ApiResponse::empty("Note deleted successfully")))
}

/// 404 when the note is absent, 403 when it belongs to someone else.
async fn ensure_owner(
    state: &AppState,
    note_id: DbId,
    user_id: DbId,
    denial: &str,
) -> AppResult<()> {
    match NoteRepo::find_owner(&state.pool, note_id).await? {
        None => Err(CoreError::NotFound { entity: NOTE }.into()),
        Some(owner) if owner != user_id => {
            tracing::debug!(note_id, user_id, "Note mutation denied: not the owner");
            Err(CoreError::Forbidden(denial.to_string()).into())
        }
        Some(_) => Ok(()),
    }
}
