pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod notes;
pub mod tags;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  service index (public)
///
/// /auth/register                     register (public)
/// /auth/login                        login (public)
/// /auth/me                           current user (requires auth)
///
/// /notes                             list (per access mode), create (auth)
/// /notes/{id}                        get (per access mode), update, delete (owner)
///
/// /tags                              list (public), create (admin)
/// /tags/{id}                         get (public), update, delete (admin)
/// /categories                        list (public), create (admin)
/// /categories/{id}                   get (public), update, delete (admin)
///
/// /admin/dashboard                   counts and recent activity (admin)
/// /admin/users                       list (admin)
/// /admin/users/{id}                  get, update, delete (admin)
/// /admin/notes                       every user's notes (admin)
/// /admin/notes/{id}                  delete any note (admin)
/// /admin/tags[/{id}]                 tag mutations (admin)
/// /admin/categories[/{id}]           category mutations (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health::api_index))
        .nest("/auth", auth::router())
        .nest("/notes", notes::router())
        .nest("/tags", tags::router())
        .nest("/categories", categories::router())
        .nest("/admin", admin::router())
}
