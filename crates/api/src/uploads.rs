//! Multipart form parsing and blob upload helpers shared by the progress
//! and field-log handlers.

use std::collections::HashMap;

use aula_core::blob::{StoredBlob, UploadKind};
use aula_core::error::CoreError;
use axum::body::Bytes;
use axum::extract::Multipart;
use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A file part of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// A fully buffered multipart form: text fields and file parts by name.
///
/// File parts with no content are dropped, so an empty `<input type=file>`
/// reads as "no file".
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read file '{name}': {e}"))
                    })?;
                    if bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let value = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read field '{name}': {e}"))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }
}

/// Parse a `YYYY-MM-DD` form value.
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "'{field}' must be a date in YYYY-MM-DD format"
        )))
    })
}

/// Check a file against the rules for `kind` without storing anything.
pub fn check_upload(kind: UploadKind, file: &UploadedFile) -> AppResult<()> {
    kind.validate(&file.file_name, &file.content_type, file.bytes.len())?;
    Ok(())
}

/// Store an already-checked file under the folder for `kind`.
pub async fn store_upload(
    state: &AppState,
    kind: UploadKind,
    file: &UploadedFile,
) -> AppResult<StoredBlob> {
    let path = kind.object_path(&file.file_name);
    let blob = state
        .blob_store
        .put(&path, &file.bytes, &file.content_type)
        .await?;
    tracing::debug!(path = %blob.path, size = file.bytes.len(), "Stored upload");
    Ok(blob)
}

/// Best-effort removal of blobs whose owning row was never written.
pub async fn discard_uploads(state: &AppState, blobs: &[StoredBlob]) {
    for blob in blobs {
        if let Err(e) = state.blob_store.delete(&blob.path).await {
            tracing::warn!(path = %blob.path, error = %e, "Failed to remove orphaned upload");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("date", " 2025-03-14 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(parse_date("date", "14/03/2025").is_err());
    }

    #[test]
    fn oversize_photo_is_rejected_before_upload() {
        let file = UploadedFile {
            file_name: "big.png".into(),
            content_type: "image/png".into(),
            bytes: Bytes::from(vec![0u8; aula_core::blob::MAX_FIELD_LOG_PHOTO_BYTES + 1]),
        };
        assert!(check_upload(UploadKind::FieldLogPhoto, &file).is_err());
        assert!(check_upload(UploadKind::ProgressPhoto, &file).is_ok());
    }
}
