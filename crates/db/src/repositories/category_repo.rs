//! Repository for the `categories` table.

use notekeep_core::categories::{SeedCategory, DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON};
use notekeep_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, description, color, icon, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new category, returning the created row.
    ///
    /// The caller validates first; a duplicate name fails on `uq_categories_name`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, color, icon)
             VALUES (BTRIM($1), NULLIF(BTRIM($2), ''), COALESCE($3, $4), COALESCE($5, $6))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .bind(DEFAULT_CATEGORY_COLOR)
            .bind(&input.icon)
            .bind(DEFAULT_CATEGORY_ICON)
            .fetch_one(pool)
            .await
    }

    /// Update a category by ID, returning the updated row.
    ///
    /// `None` fields are left unchanged. A blank `description` clears it.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET
                name = COALESCE(BTRIM($2), name),
                description = CASE WHEN $3::TEXT IS NULL THEN description
                                   ELSE NULLIF(BTRIM($3), '') END,
                color = COALESCE($4, color),
                icon = COALESCE($5, icon)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.color)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    ///
    /// Notes keep their category name; nothing cascades.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert or refresh a built-in category, keyed on its name.
    pub async fn upsert_seed(pool: &PgPool, seed: &SeedCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description, color, icon)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (name) DO UPDATE SET
                description = EXCLUDED.description,
                color = EXCLUDED.color,
                icon = EXCLUDED.icon
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(seed.name)
            .bind(seed.description)
            .bind(seed.color)
            .bind(seed.icon)
            .fetch_one(pool)
            .await
    }
}
