//! Persistence seam for the project status workflow.
//!
//! The status service only talks to a [`StatusStore`]. Production uses the
//! PostgreSQL store in `aula-db`; tests use
//! [`InMemoryStatusStore`](crate::memory_store::InMemoryStatusStore).

use async_trait::async_trait;

use crate::error::CoreError;
use crate::project_status::ProjectStatus;
use crate::status_history::{NewStatusEntry, ProjectStatusView, StatusHistoryEntry};
use crate::types::DbId;

#[async_trait]
pub trait StatusStore: Send + Sync {
    /// Short name used in log fields.
    fn backend_tag(&self) -> &'static str;

    /// All projects, in whatever order the backend returns them.
    async fn list_projects(&self) -> Result<Vec<ProjectStatusView>, CoreError>;

    async fn find_project(&self, project_id: DbId) -> Result<Option<ProjectStatusView>, CoreError>;

    /// History for one project, newest first (`recorded_at` desc, then id desc).
    async fn list_history(&self, project_id: DbId) -> Result<Vec<StatusHistoryEntry>, CoreError>;

    /// Overwrite the project's current status. `None` clears it.
    ///
    /// Fails with [`CoreError::NotFound`] if the project does not exist.
    async fn set_current_status(
        &self,
        project_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<(), CoreError>;

    /// Append one history row and return it with its store-assigned id.
    async fn append_history(
        &self,
        project_id: DbId,
        entry: &NewStatusEntry,
    ) -> Result<StatusHistoryEntry, CoreError>;

    /// Mark the project as needing manual reconciliation.
    async fn flag_for_reconciliation(&self, project_id: DbId) -> Result<(), CoreError>;

    /// Set the current status and append the matching history row.
    ///
    /// The default runs the two writes in sequence. If the append fails the
    /// project is re-read first: the status is put back to `previous` only
    /// while it still holds `entry.status`. A transition from another writer
    /// that landed in between is left in place. If the re-read or the restore
    /// fails the project is flagged and [`CoreError::PartialWrite`] is
    /// returned. Backends with transactions override this to apply both
    /// writes atomically.
    async fn record_transition(
        &self,
        project_id: DbId,
        previous: Option<ProjectStatus>,
        entry: &NewStatusEntry,
    ) -> Result<StatusHistoryEntry, CoreError> {
        self.set_current_status(project_id, Some(entry.status)).await?;

        let append_err = match self.append_history(project_id, entry).await {
            Ok(row) => return Ok(row),
            Err(e) => e,
        };

        tracing::warn!(
            project_id,
            backend = self.backend_tag(),
            error = %append_err,
            "History append failed, compensating status write"
        );

        let current = match self.find_project(project_id).await {
            Ok(Some(project)) => project.current_status,
            Ok(None) => {
                return Err(CoreError::Write(format!(
                    "history append failed, project no longer exists: {append_err}"
                )));
            }
            Err(read_err) => {
                let err = unreconciled(self, project_id, &append_err, "re-read", &read_err);
                return Err(err.await);
            }
        };

        if current != Some(entry.status) {
            tracing::warn!(
                project_id,
                backend = self.backend_tag(),
                written = %entry.status,
                current = ?current,
                "Status already changed by another transition, not restoring"
            );
            return Err(CoreError::Write(format!(
                "history append failed, status superseded by a later transition: {append_err}"
            )));
        }

        match self.set_current_status(project_id, previous).await {
            Ok(()) => Err(CoreError::Write(format!(
                "history append failed, status restored: {append_err}"
            ))),
            Err(restore_err) => {
                let err = unreconciled(self, project_id, &append_err, "restore", &restore_err);
                Err(err.await)
            }
        }
    }
}

/// Flag a project whose status no longer matches its history and build the
/// [`CoreError::PartialWrite`] reported to the caller.
async fn unreconciled<S>(
    store: &S,
    project_id: DbId,
    append_err: &CoreError,
    step: &str,
    step_err: &CoreError,
) -> CoreError
where
    S: StatusStore + ?Sized,
{
    if let Err(flag_err) = store.flag_for_reconciliation(project_id).await {
        tracing::error!(
            project_id,
            error = %flag_err,
            "Could not flag project for reconciliation"
        );
    }
    tracing::error!(
        project_id,
        backend = store.backend_tag(),
        append_error = %append_err,
        step,
        step_error = %step_err,
        "Status updated without history; manual reconciliation required"
    );
    CoreError::PartialWrite {
        project_id,
        detail: format!("append failed ({append_err}); {step} failed ({step_err})"),
    }
}
