//! Route definitions for the `/categories` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /      -> list_categories
/// POST   /      -> create_category (admin)
/// GET    /{id}  -> get_category
/// PUT    /{id}  -> update_category (admin)
/// DELETE /{id}  -> delete_category (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
}

/// Mutation-only routes, mounted at `/admin/categories`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(categories::create_category))
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}
