//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::routes::{categories, tags};
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the `admin` role.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/notes", get(admin::list_all_notes))
        .route("/notes/{id}", delete(admin::delete_any_note))
        .nest("/tags", tags::admin_router())
        .nest("/categories", categories::admin_router())
}
