//! Route definitions for the `/tags` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET    /      -> list_tags
/// POST   /      -> create_tag (admin)
/// GET    /{id}  -> get_tag
/// PUT    /{id}  -> update_tag (admin)
/// DELETE /{id}  -> delete_tag (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/{id}",
            get(tags::get_tag).put(tags::update_tag).delete(tags::delete_tag),
        )
}

/// Mutation-only routes, mounted at `/admin/tags`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(tags::create_tag))
        .route("/{id}", put(tags::update_tag).delete(tags::delete_tag))
}
