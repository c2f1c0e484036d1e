//! Repository for the `progress_entries` table.

use sqlx::PgPool;

use crate::models::progress_entry::{CreateProgressEntry, ProgressEntry};

const COLUMNS: &str = "id, entry_date, description, document_url, photo_url, created_at";

pub struct ProgressEntryRepo;

impl ProgressEntryRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProgressEntry,
    ) -> Result<ProgressEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress_entries (entry_date, description, document_url, photo_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressEntry>(&query)
            .bind(input.entry_date)
            .bind(&input.description)
            .bind(&input.document_url)
            .bind(&input.photo_url)
            .fetch_one(pool)
            .await
    }

    /// Most recently filed first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProgressEntry>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM progress_entries ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ProgressEntry>(&query).fetch_all(pool).await
    }
}
