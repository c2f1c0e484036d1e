pub mod admin;
pub mod auth;
pub mod field_log;
pub mod health;
pub mod progress;
pub mod project;
pub mod report;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                          login (public)
/// /auth/register                       student self-registration (public)
/// /auth/me                             current user
///
/// /admin/users                         list, create (admin only)
/// /admin/users/{id}                    update, delete (admin only)
///
/// /projects                            list, register
/// /projects/{id}                       get, update descriptive fields
/// /projects/{id}/status                select, transition
/// /projects/{id}/status/history        history, newest first
/// /project-status                      projects with their current status
///
/// /progress                            list, create (multipart)
/// /field-logs                          list, create (multipart)
/// /reports/projects                    filtered project report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/projects", project::router())
        .nest("/project-status", project::status_router())
        .nest("/progress", progress::router())
        .nest("/field-logs", field_log::router())
        .nest("/reports", report::router())
}
