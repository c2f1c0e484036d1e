//! Route definitions for the `/progress` resource.

use aula_core::blob::MAX_PROGRESS_UPLOAD_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Multipart overhead allowed on top of the two attachments.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/progress`.
///
/// ```text
/// GET, POST / -> list_entries, create_entry (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(progress::list_entries).post(progress::create_entry),
        )
        .layer(DefaultBodyLimit::max(
            2 * MAX_PROGRESS_UPLOAD_BYTES + FORM_OVERHEAD_BYTES,
        ))
}
