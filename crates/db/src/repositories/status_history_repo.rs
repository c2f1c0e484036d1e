//! Repository for the append-only `project_status_history` table.
//!
//! There is intentionally no update or delete.

use aula_core::status_history::NewStatusEntry;
use aula_core::types::DbId;
use sqlx::{Executor, Postgres};

use crate::models::status_history::StatusHistoryRow;

const COLUMNS: &str = "id, project_id, status_id, observation, recorded_at";

pub struct StatusHistoryRepo;

impl StatusHistoryRepo {
    /// Append one entry, returning the stored row.
    pub async fn append<'e, E>(
        executor: E,
        project_id: DbId,
        entry: &NewStatusEntry,
    ) -> Result<StatusHistoryRow, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "INSERT INTO project_status_history (project_id, status_id, observation, recorded_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StatusHistoryRow>(&query)
            .bind(project_id)
            .bind(entry.status.id())
            .bind(&entry.observation)
            .bind(entry.recorded_at)
            .fetch_one(executor)
            .await
    }

    /// All entries for a project, newest first; equal timestamps by id.
    pub async fn list_by_project<'e, E>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<StatusHistoryRow>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM project_status_history
             WHERE project_id = $1
             ORDER BY recorded_at DESC, id DESC"
        );
        sqlx::query_as::<_, StatusHistoryRow>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }
}
