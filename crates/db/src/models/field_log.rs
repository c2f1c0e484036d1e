//! Field log model and DTOs.

use aula_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from `field_logs`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FieldLog {
    pub id: DbId,
    pub log_date: NaiveDate,
    pub location: String,
    pub observations: String,
    pub photo_url: Option<String>,
    /// Email of the user who filed the log.
    pub user_email: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateFieldLog {
    pub log_date: NaiveDate,
    pub location: String,
    pub observations: String,
    pub photo_url: Option<String>,
    pub user_email: String,
}
