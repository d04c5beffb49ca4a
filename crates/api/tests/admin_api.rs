//! HTTP-level integration tests for the admin surface.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth};
use notekeep_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;

async fn table_count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_routes_reject_non_admins(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, user) = common::register(&app, "user@example.com").await;

    for uri in ["/api/admin/dashboard", "/api/admin/users", "/api/admin/notes"] {
        assert_eq!(get(app.clone(), uri).await.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(get_auth(app.clone(), uri, &user).await.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_counts_match_tables(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool.clone());
    let (_, user) = common::register(&app, "writer@example.com").await;
    for i in 0..7 {
        common::create_note(
            &app,
            &user,
            json!({"title": format!("note {i}"), "content": "c", "category": "Ideas", "tags": ["a", "b"]}),
        )
        .await;
    }

    let response = get_auth(app, "/api/admin/dashboard", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();

    assert_eq!(data["stats"]["users"], table_count(&pool, "users").await);
    assert_eq!(data["stats"]["notes"], table_count(&pool, "notes").await);
    assert_eq!(data["stats"]["categories"], table_count(&pool, "categories").await);
    assert_eq!(data["stats"]["tags"], table_count(&pool, "tags").await);
    assert_eq!(data["stats"]["notes"], 7);
    assert_eq!(data["stats"]["tags"], 2);

    assert_eq!(data["recentUsers"].as_array().unwrap().len(), 2);
    let recent_notes = data["recentNotes"].as_array().unwrap();
    assert_eq!(recent_notes.len(), 5);
    assert_eq!(recent_notes[0]["title"], "note 6");
    assert_eq!(recent_notes[0]["ownerEmail"], "writer@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_listing_hides_password_hash(pool: PgPool) {
    let (admin_id, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    common::register(&app, "listed@example.com").await;

    let json = body_json(get_auth(app.clone(), "/api/admin/users", &admin).await).await;
    assert_eq!(json["count"], 2);
    for user in json["data"].as_array().unwrap() {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("password_hash").is_none());
    }

    let json = body_json(get_auth(app, &format!("/api/admin/users/{admin_id}"), &admin).await).await;
    assert_eq!(json["data"]["role"], "admin");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user_role_and_email(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let (user_id, _) = common::register(&app, "promote@example.com").await;
    let uri = format!("/api/admin/users/{user_id}");

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "email": "  Promoted@Example.COM ", "role": "admin" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "promoted@example.com");
    assert_eq!(json["data"]["role"], "admin");

    let response = put_json_auth(app.clone(), &uri, json!({ "role": "superuser" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(app, &uri, json!({ "email": "admin@example.com" }), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_cannot_delete_self(pool: PgPool) {
    let (admin_id, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);

    let response = delete_auth(app.clone(), &format!("/api/admin/users/{admin_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["errors"], json!(["Cannot delete yourself"]));

    let response = get_auth(app, &format!("/api/admin/users/{admin_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_user_removes_their_notes(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool.clone());
    let (doomed_id, doomed) = common::register(&app, "doomed@example.com").await;
    let (_, survivor) = common::register(&app, "survivor@example.com").await;
    for _ in 0..3 {
        common::create_note(&app, &doomed, json!({"title": "t", "content": "c", "category": "Todo"})).await;
    }
    common::create_note(&app, &survivor, json!({"title": "s", "content": "c", "category": "Todo"})).await;

    let uri = format!("/api/admin/users/{doomed_id}");
    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!({}));

    let json = body_json(get_auth(app.clone(), "/api/admin/notes", &admin).await).await;
    assert_eq!(json["count"], 1);
    assert!(json["data"].as_array().unwrap().iter().all(|n| n["userId"] != doomed_id));

    assert_eq!(get_auth(app.clone(), &uri, &admin).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete_auth(app.clone(), &uri, &admin).await.status(), StatusCode::NOT_FOUND);

    // The deleted user's token no longer resolves to an account.
    let response = get_auth(app, "/api/auth/me", &doomed).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_token_cannot_create_notes_or_tags(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool.clone());
    let (gone_id, gone) = common::register(&app, "gone@example.com").await;

    let response = delete_auth(app.clone(), &format!("/api/admin/users/{gone_id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json!({"title": "t", "content": "c", "category": "Work", "tags": ["leak"]});
    let response = post_json_auth(app, "/api/notes", body, &gone).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "User no longer exists");

    assert_eq!(table_count(&pool, "tags").await, 0);
    assert_eq!(table_count(&pool, "notes").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_lists_and_deletes_any_note(pool: PgPool) {
    let (_, admin) = common::seed_admin(&pool, "admin@example.com").await;
    let app = common::build_test_app(pool);
    let (_, alice) = common::register(&app, "alice@example.com").await;
    let (_, bob) = common::register(&app, "bob@example.com").await;
    let first = common::create_note(&app, &alice, json!({"title": "a", "content": "c", "category": "Work"})).await;
    common::create_note(&app, &bob, json!({"title": "b", "content": "c", "category": "Work"})).await;

    let json = body_json(get_auth(app.clone(), "/api/admin/notes", &admin).await).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["data"][0]["title"], "b");
    assert_eq!(json["data"][0]["ownerEmail"], "bob@example.com");

    let uri = format!("/api/admin/notes/{}", first["id"]);
    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &format!("/api/notes/{}", first["id"]), &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete_auth(app, &uri, &admin).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_role_comes_from_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, _) = common::register(&app, "elevated@example.com").await;

    // A token carrying the admin role passes the gate.
    let token = common::token_for(user_id, Role::Admin);
    let response = get_auth(app, "/api/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
