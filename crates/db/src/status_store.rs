//! PostgreSQL implementation of [`StatusStore`].
//!
//! Status and history are written in one transaction, so the compensating
//! path of the trait's default `record_transition` is never needed here.

use async_trait::async_trait;
use aula_core::error::CoreError;
use aula_core::project_status::ProjectStatus;
use aula_core::status_history::{NewStatusEntry, ProjectStatusView, StatusHistoryEntry};
use aula_core::status_store::StatusStore;
use aula_core::types::DbId;

use crate::repositories::{ProjectRepo, StatusHistoryRepo};
use crate::DbPool;

pub struct PgStatusStore {
    pool: DbPool,
}

impl PgStatusStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn read_err(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Status store read failed");
    CoreError::Retrieval(err.to_string())
}

fn write_err(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Status store write failed");
    CoreError::Write(err.to_string())
}

fn not_found(project_id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Project",
        id: project_id,
    }
}

#[async_trait]
impl StatusStore for PgStatusStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn list_projects(&self) -> Result<Vec<ProjectStatusView>, CoreError> {
        ProjectRepo::list(&self.pool)
            .await
            .map_err(read_err)?
            .iter()
            .map(|p| p.to_status_view())
            .collect()
    }

    async fn find_project(&self, project_id: DbId) -> Result<Option<ProjectStatusView>, CoreError> {
        ProjectRepo::find_by_id(&self.pool, project_id)
            .await
            .map_err(read_err)?
            .map(|p| p.to_status_view())
            .transpose()
    }

    async fn list_history(&self, project_id: DbId) -> Result<Vec<StatusHistoryEntry>, CoreError> {
        StatusHistoryRepo::list_by_project(&self.pool, project_id)
            .await
            .map_err(read_err)?
            .into_iter()
            .map(StatusHistoryEntry::try_from)
            .collect()
    }

    async fn set_current_status(
        &self,
        project_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<(), CoreError> {
        let found = ProjectRepo::set_current_status(&self.pool, project_id, status)
            .await
            .map_err(write_err)?;
        if found {
            Ok(())
        } else {
            Err(not_found(project_id))
        }
    }

    async fn append_history(
        &self,
        project_id: DbId,
        entry: &NewStatusEntry,
    ) -> Result<StatusHistoryEntry, CoreError> {
        let row = StatusHistoryRepo::append(&self.pool, project_id, entry)
            .await
            .map_err(write_err)?;
        row.try_into()
    }

    async fn flag_for_reconciliation(&self, project_id: DbId) -> Result<(), CoreError> {
        ProjectRepo::flag_for_reconciliation(&self.pool, project_id)
            .await
            .map_err(write_err)?;
        Ok(())
    }

    async fn record_transition(
        &self,
        project_id: DbId,
        _previous: Option<ProjectStatus>,
        entry: &NewStatusEntry,
    ) -> Result<StatusHistoryEntry, CoreError> {
        let mut tx = self.pool.begin().await.map_err(write_err)?;

        let found = ProjectRepo::set_current_status(&mut *tx, project_id, Some(entry.status))
            .await
            .map_err(write_err)?;
        if !found {
            // Dropping `tx` rolls back.
            return Err(not_found(project_id));
        }

        let row = StatusHistoryRepo::append(&mut *tx, project_id, entry)
            .await
            .map_err(write_err)?;

        tx.commit().await.map_err(write_err)?;
        row.try_into()
    }
}
