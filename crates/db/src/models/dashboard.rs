//! Admin dashboard aggregates.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::note::AdminNote;
use crate::models::user::UserResponse;

/// Row counts for each collection, taken in a single statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct EntityCounts {
    pub users: i64,
    pub notes: i64,
    pub categories: i64,
    pub tags: i64,
}

/// Payload of `GET /api/admin/dashboard`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stats: EntityCounts,
    pub recent_users: Vec<UserResponse>,
    pub recent_notes: Vec<AdminNote>,
}
