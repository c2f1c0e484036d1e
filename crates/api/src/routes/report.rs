//! Route definitions for `/reports`.

use axum::routing::get;
use axum::Router;

use crate::handlers::report;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /projects?field=&search= -> project_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/projects", get(report::project_report))
}
