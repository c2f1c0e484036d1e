//! Route definitions for `/admin`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/admin` (admin role only).
///
/// ```text
/// GET, POST    /users        -> list_users, create_user
/// PUT, DELETE  /users/{id}   -> update_user, delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(user::list_users).post(user::create_user))
        .route(
            "/users/{id}",
            put(user::update_user).delete(user::delete_user),
        )
}
