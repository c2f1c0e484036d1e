//! Route definitions for `/projects` and `/project-status`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{project, project_status};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET, POST /                      -> list_projects, create_project
/// GET, PUT  /{id}                  -> get_project, update_project
/// GET, POST /{id}/status           -> select_project, transition_status
/// GET       /{id}/status/history   -> list_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(project::list_projects).post(project::create_project),
        )
        .route(
            "/{id}",
            get(project::get_project).put(project::update_project),
        )
        .route(
            "/{id}/status",
            get(project_status::select_project).post(project_status::transition_status),
        )
        .route("/{id}/status/history", get(project_status::list_history))
}

/// Routes mounted at `/project-status`.
///
/// ```text
/// GET / -> list_projects (status view)
/// ```
pub fn status_router() -> Router<AppState> {
    Router::new().route("/", get(project_status::list_projects))
}
