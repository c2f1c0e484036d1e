//! Progress entry model and DTOs.

use aula_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from `progress_entries`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressEntry {
    pub id: DbId,
    pub entry_date: NaiveDate,
    pub description: String,
    pub document_url: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a progress entry once its files are uploaded.
#[derive(Debug, Clone)]
pub struct CreateProgressEntry {
    pub entry_date: NaiveDate,
    pub description: String,
    pub document_url: Option<String>,
    pub photo_url: Option<String>,
}
