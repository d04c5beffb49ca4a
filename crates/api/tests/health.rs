//! Root-level health check and the `/api` index.

mod common;

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use common::{body_json, get};
use notekeep_core::access::NoteAccessMode;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
    assert!(json["version"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_api_index_lists_endpoints(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["endpoints"]["notes"], "/api/notes");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_route_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_timeout_uses_error_envelope(pool: PgPool) {
    let mut config = common::test_config(NoteAccessMode::Public);
    config.request_timeout_secs = 0;
    let app = common::build_test_app_with_config(pool, config);

    let response = get(app, "/api/categories").await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/json");

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Request timed out");
}
