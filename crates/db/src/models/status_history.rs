//! Status history row model.

use aula_core::error::CoreError;
use aula_core::project_status::ProjectStatus;
use aula_core::status_history::StatusHistoryEntry;
use aula_core::types::{DbId, StatusId, Timestamp};
use sqlx::FromRow;

/// A row from `project_status_history`. Rows are never updated.
#[derive(Debug, Clone, FromRow)]
pub struct StatusHistoryRow {
    pub id: DbId,
    pub project_id: DbId,
    pub status_id: StatusId,
    pub observation: String,
    pub recorded_at: Timestamp,
}

impl TryFrom<StatusHistoryRow> for StatusHistoryEntry {
    type Error = CoreError;

    fn try_from(row: StatusHistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            status: ProjectStatus::from_id(row.status_id)?,
            observation: row.observation,
            recorded_at: row.recorded_at,
        })
    }
}
