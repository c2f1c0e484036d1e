//! Route definitions for the `/field-logs` resource.

use aula_core::blob::MAX_FIELD_LOG_PHOTO_BYTES;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::handlers::field_log;
use crate::state::AppState;

/// Multipart overhead allowed on top of the photo.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/field-logs`.
///
/// ```text
/// GET, POST / -> list_logs, create_log (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(field_log::list_logs).post(field_log::create_log))
        .layer(DefaultBodyLimit::max(
            MAX_FIELD_LOG_PHOTO_BYTES + FORM_OVERHEAD_BYTES,
        ))
}
