#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use notekeep_api::auth::jwt::{JwtConfig, JwtKeys};
use notekeep_api::auth::password::{Argon2Hasher, PasswordConfig};
use notekeep_api::config::ServerConfig;
use notekeep_api::router::build_app_router;
use notekeep_api::state::AppState;
use notekeep_core::access::NoteAccessMode;
use notekeep_core::credentials::CredentialHasher;
use notekeep_core::roles::Role;
use notekeep_core::types::DbId;
use notekeep_db::models::user::CreateUser;
use notekeep_db::repositories::UserRepo;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(note_access: NoteAccessMode) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        database_max_connections: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_mins: 60,
        },
        // Cheap parameters so registration stays fast under test.
        password: PasswordConfig {
            time_cost: 1,
            memory_kib: 1024,
        },
        note_access,
    }
}

/// The full application router in owner-scoped mode.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mode(pool, NoteAccessMode::Owner)
}

/// The full application router, with the same middleware stack production uses.
pub fn build_test_app_with_mode(pool: PgPool, note_access: NoteAccessMode) -> Router {
    build_test_app_with_config(pool, test_config(note_access))
}

/// The full application router built from an explicit configuration.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let hasher = Arc::new(Argon2Hasher::new(config.password).expect("valid params"));
    build_router(pool, config, hasher)
}

/// The owner-mode router with a caller-supplied credential hasher.
pub fn build_test_app_with_hasher(pool: PgPool, hasher: Arc<dyn CredentialHasher>) -> Router {
    build_router(pool, test_config(NoteAccessMode::Owner), hasher)
}

fn build_router(pool: PgPool, config: ServerConfig, hasher: Arc<dyn CredentialHasher>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        hasher,
        tokens: Arc::new(JwtKeys::new(&config.jwt)),
    };
    build_app_router(state, &config)
}

/// Sign a token the test app will accept.
pub fn token_for(user_id: DbId, role: Role) -> String {
    JwtKeys::new(&test_config(NoteAccessMode::Owner).jwt)
        .generate(user_id, role)
        .expect("token generation should succeed")
}

/// Insert an admin directly and return its id and a bearer token.
pub async fn seed_admin(pool: &PgPool, email: &str) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "unused".to_string(),
            role: Role::Admin,
        },
    )
    .await
    .expect("admin creation should succeed");
    (user.id, token_for(user.id, Role::Admin))
}

/// Register through the API and return the new user's id and token.
pub async fn register(app: &Router, email: &str) -> (DbId, String) {
    let body = serde_json::json!({
        "email": email,
        "password": "secret123",
        "passwordConfirm": "secret123",
    });
    let response = post_json(app.clone(), "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["user"]["id"].as_i64().expect("user id");
    let token = json["data"]["token"].as_str().expect("token").to_string();
    (id, token)
}

/// Create a note through the API and return its JSON.
pub async fn create_note(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/notes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

fn with_json(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder("GET", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("GET", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, with_json("POST", uri, body, None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, with_json("POST", uri, body, Some(token))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, with_json("PUT", uri, body, Some(token))).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, builder("DELETE", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("DELETE", uri, Some(token)).body(Body::empty()).unwrap()).await
}
