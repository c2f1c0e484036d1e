//! Blob storage for uploaded documents and photos.
//!
//! Objects are addressed by a relative path (`photos/1712345678901_site.jpg`)
//! and exposed through a public URL once stored.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use crate::error::CoreError;

/// 10 MiB, the cap for progress-entry documents and photos.
pub const MAX_PROGRESS_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// 5 MiB, the cap for field-log photos.
pub const MAX_FIELD_LOG_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// What an upload is for. Decides the folder, size cap, and accepted types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProgressDocument,
    ProgressPhoto,
    FieldLogPhoto,
}

impl UploadKind {
    pub fn folder(self) -> &'static str {
        match self {
            Self::ProgressDocument => "documents",
            Self::ProgressPhoto => "photos",
            Self::FieldLogPhoto => "field-logs",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::ProgressDocument | Self::ProgressPhoto => MAX_PROGRESS_UPLOAD_BYTES,
            Self::FieldLogPhoto => MAX_FIELD_LOG_PHOTO_BYTES,
        }
    }

    /// Reject uploads that are empty, too large, or of the wrong type.
    pub fn validate(
        self,
        file_name: &str,
        content_type: &str,
        size: usize,
    ) -> Result<(), CoreError> {
        if size == 0 {
            return Err(CoreError::Validation(format!("'{file_name}' is empty")));
        }
        if size > self.max_bytes() {
            return Err(CoreError::Validation(format!(
                "'{file_name}' is too large (max {} MB)",
                self.max_bytes() / (1024 * 1024)
            )));
        }
        let accepted = match self {
            Self::ProgressDocument => DOCUMENT_CONTENT_TYPES.contains(&content_type),
            Self::ProgressPhoto | Self::FieldLogPhoto => content_type.starts_with("image/"),
        };
        if !accepted {
            let expected = match self {
                Self::ProgressDocument => "a PDF or Word document",
                Self::ProgressPhoto | Self::FieldLogPhoto => "an image",
            };
            return Err(CoreError::Validation(format!(
                "'{file_name}' must be {expected} (got '{content_type}')"
            )));
        }
        Ok(())
    }

    /// Build a unique object path: `{folder}/{millis}_{sanitized name}`.
    pub fn object_path(self, file_name: &str) -> String {
        format!(
            "{}/{}_{}",
            self.folder(),
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        )
    }
}

/// Keep ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// A stored object and where clients can fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBlob {
    pub path: String,
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, path: &str, bytes: &[u8], content_type: &str)
        -> Result<StoredBlob, CoreError>;

    async fn delete(&self, path: &str) -> Result<(), CoreError>;
}

/// Filesystem-backed blob store. URLs are `{public_base_url}/{path}`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, CoreError> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(CoreError::Validation(format!("Invalid blob path '{path}'")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredBlob, CoreError> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CoreError::Write(format!("create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| CoreError::Write(format!("write {}: {e}", target.display())))?;

        tracing::debug!(path, size = bytes.len(), content_type, "Blob stored");
        Ok(StoredBlob {
            path: path.to_string(),
            url: format!("{}/{path}", self.public_base_url),
        })
    }

    async fn delete(&self, path: &str) -> Result<(), CoreError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Write(format!("delete {}: {e}", target.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\fotos\\día 1.jpg"), "d_a_1.jpg");
        assert_eq!(sanitize_file_name("..."), "upload");
    }

    #[test]
    fn object_path_uses_kind_folder() {
        let path = UploadKind::FieldLogPhoto.object_path("site.png");
        assert!(path.starts_with("field-logs/"));
        assert!(path.ends_with("_site.png"));
    }

    #[test]
    fn documents_must_be_pdf_or_word() {
        let kind = UploadKind::ProgressDocument;
        assert!(kind.validate("a.pdf", "application/pdf", 10).is_ok());
        assert_matches!(
            kind.validate("a.exe", "application/octet-stream", 10),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn field_log_photo_cap_is_five_megabytes() {
        let kind = UploadKind::FieldLogPhoto;
        assert!(kind.validate("a.jpg", "image/jpeg", MAX_FIELD_LOG_PHOTO_BYTES).is_ok());
        assert!(kind
            .validate("a.jpg", "image/jpeg", MAX_FIELD_LOG_PHOTO_BYTES + 1)
            .is_err());
        assert!(kind.validate("a.txt", "text/plain", 10).is_err());
    }

    #[test]
    fn progress_photo_allows_ten_megabytes() {
        let kind = UploadKind::ProgressPhoto;
        assert!(kind
            .validate("a.jpg", "image/jpeg", MAX_FIELD_LOG_PHOTO_BYTES + 1)
            .is_ok());
        assert!(kind.validate("a.jpg", "image/jpeg", 0).is_err());
    }

    #[tokio::test]
    async fn local_store_writes_and_deletes() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost:3000/files/");

        let blob = store
            .put("photos/1_a.jpg", b"jpeg-bytes", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(blob.url, "http://localhost:3000/files/photos/1_a.jpg");
        let on_disk = tokio::fs::read(dir.path().join("photos/1_a.jpg")).await.unwrap();
        assert_eq!(on_disk, b"jpeg-bytes");

        store.delete("photos/1_a.jpg").await.unwrap();
        assert!(!dir.path().join("photos/1_a.jpg").exists());
        // Deleting again is a no-op.
        store.delete("photos/1_a.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn local_store_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path(), "http://localhost");
        assert_matches!(
            store.put("../outside.txt", b"x", "text/plain").await,
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            store.put("/abs.txt", b"x", "text/plain").await,
            Err(CoreError::Validation(_))
        );
    }
}
