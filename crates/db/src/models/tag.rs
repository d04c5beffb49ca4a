//! Tag model and DTOs.

use notekeep_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tags` table. `name` is always stored normalized.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight tag info embedded in notes.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
    pub color: String,
}

/// A tag together with the note it is attached to, for batch loading.
#[derive(Debug, Clone, FromRow)]
pub struct NoteTagRow {
    pub note_id: DbId,
    #[sqlx(flatten)]
    pub tag: TagInfo,
}

/// Request body for creating a tag explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTag {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Request body for updating a tag. Only provided fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
    pub color: Option<String>,
}
