//! Cross-table aggregates for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::EntityCounts;

pub struct DashboardRepo;

impl DashboardRepo {
    /// Row counts of every collection, read from one statement snapshot.
    pub async fn counts(pool: &PgPool) -> Result<EntityCounts, sqlx::Error> {
        sqlx::query_as::<_, EntityCounts>(
            "SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM notes) AS notes,
                (SELECT COUNT(*) FROM categories) AS categories,
                (SELECT COUNT(*) FROM tags) AS tags",
        )
        .fetch_one(pool)
        .await
    }
}
