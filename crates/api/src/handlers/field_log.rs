//! Handlers for the `/field-logs` resource.

use aula_core::blob::UploadKind;
use aula_core::validation::require_present;
use aula_db::models::field_log::{CreateFieldLog, FieldLog};
use aula_db::repositories::FieldLogRepo;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{check_upload, discard_uploads, parse_date, store_upload, MultipartForm};

/// GET /api/v1/field-logs
pub async fn list_logs(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<FieldLog>>>> {
    let logs = FieldLogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// POST /api/v1/field-logs
///
/// Multipart fields: `date`, `location`, `observations`, optional `photo`.
/// The log is attributed to the caller's email.
pub async fn create_log(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<FieldLog>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let log_date = parse_date("date", require_present("date", form.text("date"))?)?;
    let location = require_present("location", form.text("location"))?.to_string();
    let observations = require_present("observations", form.text("observations"))?.to_string();

    let photo = form.take_file("photo");
    if let Some(file) = &photo {
        check_upload(UploadKind::FieldLogPhoto, file)?;
    }

    let blob = match &photo {
        Some(file) => Some(store_upload(&state, UploadKind::FieldLogPhoto, file).await?),
        None => None,
    };

    let input = CreateFieldLog {
        log_date,
        location,
        observations,
        photo_url: blob.as_ref().map(|b| b.url.clone()),
        user_email: user.email.clone(),
    };
    let log = match FieldLogRepo::create(&state.pool, &input).await {
        Ok(log) => log,
        Err(e) => {
            discard_uploads(&state, blob.as_slice()).await;
            return Err(e.into());
        }
    };
    tracing::info!(log_id = log.id, user_id = user.user_id, "Field log saved");

    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}
