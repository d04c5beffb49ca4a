//! Note model, response shapes, and DTOs.

use notekeep_core::notes::NoteFields;
use notekeep_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::tag::TagInfo;

/// A row from the `notes` table (without its tags).
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A note row joined with its owner's email (admin views).
#[derive(Debug, Clone, FromRow)]
pub struct OwnedNoteRow {
    #[sqlx(flatten)]
    pub note: NoteRow,
    pub owner_email: Option<String>,
}

/// A note as returned to clients, with its tags resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category: String,
    pub is_pinned: bool,
    pub color: String,
    pub tags: Vec<TagInfo>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    pub fn from_row(row: NoteRow, tags: Vec<TagInfo>) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            category: row.category,
            is_pinned: row.is_pinned,
            color: row.color,
            tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A note with its owner's email resolved, for admin listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminNote {
    #[serde(flatten)]
    pub note: Note,
    pub owner_email: Option<String>,
}

/// Request body for `POST /api/notes`.
///
/// Fields are optional at the type level so validation can report every
/// missing field at once instead of failing on the first during decoding.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
    pub color: Option<String>,
    /// Tag names; resolved to tag ids with find-or-create.
    pub tags: Option<Vec<String>>,
}

impl CreateNote {
    pub fn fields(&self) -> NoteFields<'_> {
        NoteFields {
            title: self.title.as_deref(),
            content: self.content.as_deref(),
            category: self.category.as_deref(),
            color: self.color.as_deref(),
            tags: self.tags.as_deref(),
        }
    }
}

/// Request body for `PUT /api/notes/{id}`. Only provided fields change.
///
/// `tags: []` clears every tag; omitting `tags` keeps the current set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateNote {
    pub fn fields(&self) -> NoteFields<'_> {
        NoteFields {
            title: self.title.as_deref(),
            content: self.content.as_deref(),
            category: self.category.as_deref(),
            color: self.color.as_deref(),
            tags: self.tags.as_deref(),
        }
    }
}

/// Query parameters for `GET /api/notes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListParams {
    pub category: Option<String>,
    /// `"true"` selects pinned notes; any other value selects unpinned ones.
    pub is_pinned: Option<String>,
    /// Tag name, matched after normalization.
    pub tag: Option<String>,
    /// Full-text search over title and content.
    pub search: Option<String>,
}

/// Store-level note filter, with the tag already resolved to an id.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    pub owner_id: Option<DbId>,
    pub category: Option<String>,
    pub is_pinned: Option<bool>,
    pub tag_id: Option<DbId>,
    pub search: Option<String>,
}

impl NoteListParams {
    /// Build the store filter. Blank strings are treated as absent.
    pub fn to_filter(&self, owner_id: Option<DbId>, tag_id: Option<DbId>) -> NoteFilter {
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        NoteFilter {
            owner_id,
            category: non_blank(&self.category),
            is_pinned: self.is_pinned.as_deref().map(|v| v == "true"),
            tag_id,
            search: non_blank(&self.search),
        }
    }
}
