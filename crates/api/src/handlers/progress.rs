//! Handlers for the `/progress` resource (progress entries with attachments).

use aula_core::blob::{StoredBlob, UploadKind};
use aula_core::validation::require_present;
use aula_db::models::progress_entry::{CreateProgressEntry, ProgressEntry};
use aula_db::repositories::ProgressEntryRepo;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{check_upload, discard_uploads, parse_date, store_upload, MultipartForm};

/// GET /api/v1/progress
pub async fn list_entries(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<ProgressEntry>>>> {
    let entries = ProgressEntryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/progress
///
/// Multipart fields: `date`, `description`, optional `document` (PDF/Word)
/// and `photo` (image). Everything is validated before any file is stored;
/// stored files are removed again if the row cannot be written.
pub async fn create_entry(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ProgressEntry>>)> {
    let mut form = MultipartForm::read(multipart).await?;

    let entry_date = parse_date("date", require_present("date", form.text("date"))?)?;
    let description = require_present("description", form.text("description"))?.to_string();

    let document = form.take_file("document");
    let photo = form.take_file("photo");
    if let Some(file) = &document {
        check_upload(UploadKind::ProgressDocument, file)?;
    }
    if let Some(file) = &photo {
        check_upload(UploadKind::ProgressPhoto, file)?;
    }

    let mut stored: Vec<StoredBlob> = Vec::new();
    let document_url = match &document {
        Some(file) => {
            let blob = store_upload(&state, UploadKind::ProgressDocument, file).await?;
            let url = blob.url.clone();
            stored.push(blob);
            Some(url)
        }
        None => None,
    };
    let photo_url = match &photo {
        Some(file) => match store_upload(&state, UploadKind::ProgressPhoto, file).await {
            Ok(blob) => {
                let url = blob.url.clone();
                stored.push(blob);
                Some(url)
            }
            Err(e) => {
                discard_uploads(&state, &stored).await;
                return Err(e);
            }
        },
        None => None,
    };

    let input = CreateProgressEntry {
        entry_date,
        description,
        document_url,
        photo_url,
    };
    let entry = match ProgressEntryRepo::create(&state.pool, &input).await {
        Ok(entry) => entry,
        Err(e) => {
            discard_uploads(&state, &stored).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        entry_id = entry.id,
        user_id = user.user_id,
        files = stored.len(),
        "Progress entry saved"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}
