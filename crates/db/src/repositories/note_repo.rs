//! Repository for the `notes` table and its tag links.
//!
//! Read methods return [`Note`] values with tags already resolved. Tags for a
//! whole result set are fetched with one extra query, never one per note.

use std::collections::HashMap;

use notekeep_core::notes::{DEFAULT_NOTE_CATEGORY, DEFAULT_NOTE_COLOR};
use notekeep_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::note::{
    AdminNote, CreateNote, Note, NoteFilter, NoteRow, OwnedNoteRow, UpdateNote,
};
use crate::models::tag::TagInfo;
use crate::repositories::TagRepo;

/// Column list for `notes` queries.
const COLUMNS: &str = "id, user_id, title, content, category, is_pinned, color, created_at, updated_at";

/// Same columns, qualified for queries that join `notes n`.
const N_COLUMNS: &str = "n.id, n.user_id, n.title, n.content, n.category, n.is_pinned, n.color, \
                         n.created_at, n.updated_at";

/// Listing order: pinned first, then newest, with `id` as the tie-breaker.
const ORDER_BY: &str = "ORDER BY n.is_pinned DESC, n.created_at DESC, n.id DESC";

/// Provides CRUD operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a note owned by `user_id`, resolving `input.tags` with
    /// find-or-create, all in one transaction.
    ///
    /// The owner row is share-locked first, so a concurrent account delete
    /// either waits for this note or wins outright. Returns `None` when the
    /// owner no longer exists; no tags are created in that case.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let owner = sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = $1 FOR SHARE")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if owner.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let tag_ids =
            TagRepo::resolve_names(&mut tx, input.tags.as_deref().unwrap_or_default()).await?;

        let query = format!(
            "INSERT INTO notes (user_id, title, content, category, is_pinned, color)
             VALUES ($1, BTRIM($2), BTRIM($3), COALESCE(BTRIM($4), $5), COALESCE($6, FALSE), COALESCE($7, $8))
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(DEFAULT_NOTE_CATEGORY)
            .bind(input.is_pinned)
            .bind(&input.color)
            .bind(DEFAULT_NOTE_COLOR)
            .fetch_one(&mut *tx)
            .await?;

        Self::link_tags(&mut tx, row.id, &tag_ids).await?;
        tx.commit().await?;

        Self::with_tags_one(pool, row).await.map(Some)
    }

    /// Find a note by ID. With `owner` set, a note owned by someone else is
    /// reported exactly like a missing one.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        owner: Option<DbId>,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE id = $1 AND ($2::BIGINT IS NULL OR user_id = $2)"
        );
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await?;

        match row {
            Some(row) => Self::with_tags_one(pool, row).await.map(Some),
            None => Ok(None),
        }
    }

    /// The owner of a note, or `None` if the note does not exist.
    pub async fn find_owner(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT user_id FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List notes matching `filter`. Every `None` field is unconstrained.
    ///
    /// `search` is matched with `plainto_tsquery` against the stored
    /// title+content vector, so every word of the term must appear.
    pub async fn list(pool: &PgPool, filter: &NoteFilter) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {N_COLUMNS} FROM notes n
             WHERE ($1::BIGINT IS NULL OR n.user_id = $1)
               AND ($2::TEXT IS NULL OR n.category = $2)
               AND ($3::BOOLEAN IS NULL OR n.is_pinned = $3)
               AND ($4::BIGINT IS NULL OR EXISTS (
                    SELECT 1 FROM note_tags nt WHERE nt.note_id = n.id AND nt.tag_id = $4))
               AND ($5::TEXT IS NULL OR n.search_vector @@ plainto_tsquery('simple', $5))
             {ORDER_BY}"
        );
        let rows = sqlx::query_as::<_, NoteRow>(&query)
            .bind(filter.owner_id)
            .bind(&filter.category)
            .bind(filter.is_pinned)
            .bind(filter.tag_id)
            .bind(&filter.search)
            .fetch_all(pool)
            .await?;

        Self::with_tags(pool, rows).await
    }

    /// Apply the provided fields of `input` to a note.
    ///
    /// With `input.tags` set, the note's tag set is replaced (an empty list
    /// clears it) by names resolved inside the same transaction; with `None`
    /// the links are left alone. Returns `None` if the note does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE notes SET
                title = COALESCE(BTRIM($2), title),
                content = COALESCE(BTRIM($3), content),
                category = COALESCE(BTRIM($4), category),
                is_pinned = COALESCE($5, is_pinned),
                color = COALESCE($6, color)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, NoteRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.category)
            .bind(input.is_pinned)
            .bind(&input.color)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(names) = &input.tags {
            let tag_ids = TagRepo::resolve_names(&mut tx, names).await?;
            sqlx::query("DELETE FROM note_tags WHERE note_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::link_tags(&mut tx, id, &tag_ids).await?;
        }

        tx.commit().await?;
        Self::with_tags_one(pool, row).await.map(Some)
    }

    /// Delete a note by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every note across all users, with owner emails, newest first.
    pub async fn list_all_with_owner(pool: &PgPool) -> Result<Vec<AdminNote>, sqlx::Error> {
        Self::list_with_owner(pool, None).await
    }

    /// The `limit` most recently created notes, with owner emails.
    pub async fn list_recent_with_owner(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<AdminNote>, sqlx::Error> {
        Self::list_with_owner(pool, Some(limit)).await
    }

    async fn list_with_owner(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<AdminNote>, sqlx::Error> {
        let query = format!(
            "SELECT {N_COLUMNS}, u.email AS owner_email
             FROM notes n
             LEFT JOIN users u ON u.id = n.user_id
             ORDER BY n.created_at DESC, n.id DESC
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, OwnedNoteRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|r| r.note.id).collect();
        let mut tags = Self::tags_by_note(pool, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let note_tags = tags.remove(&r.note.id).unwrap_or_default();
                AdminNote {
                    note: Note::from_row(r.note, note_tags),
                    owner_email: r.owner_email,
                }
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn link_tags(
        conn: &mut PgConnection,
        note_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if tag_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO note_tags (note_id, tag_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT DO NOTHING",
        )
        .bind(note_id)
        .bind(tag_ids)
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn tags_by_note(
        pool: &PgPool,
        note_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<TagInfo>>, sqlx::Error> {
        let mut grouped: HashMap<DbId, Vec<TagInfo>> = HashMap::new();
        for row in TagRepo::list_for_notes(pool, note_ids).await? {
            grouped.entry(row.note_id).or_default().push(row.tag);
        }
        Ok(grouped)
    }

    async fn with_tags(pool: &PgPool, rows: Vec<NoteRow>) -> Result<Vec<Note>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let mut tags = Self::tags_by_note(pool, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let note_tags = tags.remove(&row.id).unwrap_or_default();
                Note::from_row(row, note_tags)
            })
            .collect())
    }

    async fn with_tags_one(pool: &PgPool, row: NoteRow) -> Result<Note, sqlx::Error> {
        let mut notes = Self::with_tags(pool, vec![row]).await?;
        notes.pop().ok_or(sqlx::Error::RowNotFound)
    }
}
