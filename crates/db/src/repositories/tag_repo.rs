//! Repository for the `tags` table and the `note_tags` junction.
//!
//! Every method normalizes names through
//! [`normalize_tag_name`](notekeep_core::tags::normalize_tag_name) before
//! touching the table, which stores normalized names only.

use notekeep_core::tags::{dedupe_tag_names, normalize_tag_name, DEFAULT_TAG_COLOR};
use notekeep_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::tag::{NoteTagRow, Tag};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "id, name, color, created_at, updated_at";

/// Provides CRUD operations for tags and note-tag lookups.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Find-or-create
    // -----------------------------------------------------------------------

    /// Return the tag with this normalized name, creating it if absent.
    ///
    /// A single `INSERT .. ON CONFLICT` statement, so concurrent callers
    /// racing on the same new name all get the one row that wins. The no-op
    /// `DO UPDATE` makes `RETURNING` yield the existing row on conflict; the
    /// existing color is left untouched.
    pub async fn find_or_create<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
        color: Option<&str>,
    ) -> Result<Tag, sqlx::Error> {
        let normalized = normalize_tag_name(name);
        let query = format!(
            "INSERT INTO tags (name, color) \
             VALUES ($1, COALESCE($2, $3)) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&normalized)
            .bind(color)
            .bind(DEFAULT_TAG_COLOR)
            .fetch_one(executor)
            .await
    }

    /// Resolve user-supplied tag names to tag ids, creating missing tags.
    ///
    /// Names differing only by case or surrounding whitespace resolve to the
    /// same id, and each id appears once, in first-seen order. Runs on the
    /// caller's connection so tags created here roll back with its
    /// transaction.
    pub async fn resolve_names<S: AsRef<str>>(
        conn: &mut PgConnection,
        names: &[S],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut ids = Vec::new();
        for name in dedupe_tag_names(names) {
            let tag = Self::find_or_create(&mut *conn, &name, None).await?;
            if !ids.contains(&tag.id) {
                ids.push(tag.id);
            }
        }
        Ok(ids)
    }

    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Explicitly create a tag. A duplicate name fails on `uq_tags_name`.
    pub async fn create(pool: &PgPool, name: &str, color: Option<&str>) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, color) \
             VALUES ($1, COALESCE($2, $3)) \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(normalize_tag_name(name))
            .bind(color)
            .bind(DEFAULT_TAG_COLOR)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a tag by name, normalizing the input first.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE name = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(normalize_tag_name(name))
            .fetch_optional(pool)
            .await
    }

    /// List all tags ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY name ASC");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Update a tag's name (re-normalized) and/or color.
    ///
    /// Returns `None` if no tag with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        color: Option<&str>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE tags SET \
                 name = COALESCE($2, name), \
                 color = COALESCE($3, color) \
             WHERE id = $1 \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(name.map(normalize_tag_name))
            .bind(color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a tag by ID. The `note_tags` foreign key detaches it from
    /// every note in the same statement; the notes themselves survive.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Note-tag lookups
    // -----------------------------------------------------------------------

    /// All tags attached to any of `note_ids`, in one query.
    pub async fn list_for_notes(
        pool: &PgPool,
        note_ids: &[DbId],
    ) -> Result<Vec<NoteTagRow>, sqlx::Error> {
        if note_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, NoteTagRow>(
            "SELECT nt.note_id, t.id, t.name, t.color \
             FROM note_tags nt \
             JOIN tags t ON t.id = nt.tag_id \
             WHERE nt.note_id = ANY($1) \
             ORDER BY t.name",
        )
        .bind(note_ids)
        .fetch_all(pool)
        .await
    }
}
