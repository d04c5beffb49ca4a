//! Liveness and service discovery.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// GET /health
///
/// 200 when the database answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match notekeep_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version: env!("CARGO_PKG_VERSION"),
                database: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version: env!("CARGO_PKG_VERSION"),
                    database: "unreachable",
                }),
            )
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiIndex {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub auth: &'static str,
    pub notes: &'static str,
    pub tags: &'static str,
    pub categories: &'static str,
    pub admin: &'static str,
}

/// GET /api
pub async fn api_index() -> Json<ApiIndex> {
    Json(ApiIndex {
        message: "Welcome to the notekeep API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            auth: "/api/auth (POST /register, POST /login, GET /me)",
            notes: "/api/notes",
            tags: "/api/tags",
            categories: "/api/categories",
            admin: "/api/admin (dashboard, users, notes, tags, categories)",
        },
    })
}
