//! Project status workflow: current status plus an append-only history.
//!
//! Every call takes the project id explicitly; the service keeps no
//! "selected project" between calls and never caches history.

use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreError;
use crate::project_status::ProjectStatus;
use crate::status_history::{
    NewStatusEntry, ProjectSelection, ProjectStatusView, StatusHistoryEntry,
};
use crate::status_store::StatusStore;
use crate::types::{DbId, Timestamp};

/// Source of the `recorded_at` timestamp for new history rows.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

#[derive(Clone)]
pub struct ProjectStatusService {
    store: Arc<dyn StatusStore>,
    clock: Clock,
}

impl ProjectStatusService {
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    pub fn with_clock(store: Arc<dyn StatusStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectStatusView>, CoreError> {
        self.store.list_projects().await
    }

    /// Load a project and its history.
    pub async fn select_project(&self, project_id: DbId) -> Result<ProjectSelection, CoreError> {
        let project = self.require_project(project_id).await?;
        let history = self.store.list_history(project_id).await?;
        Ok(ProjectSelection { project, history })
    }

    /// History for a project, newest first. Re-reads the store on every call.
    pub async fn list_history(
        &self,
        project_id: DbId,
    ) -> Result<Vec<StatusHistoryEntry>, CoreError> {
        self.require_project(project_id).await?;
        self.store.list_history(project_id).await
    }

    /// Move a project to `new_status`, recording `observation` in its history.
    ///
    /// Input is validated before any write. Any status may follow any other.
    pub async fn transition_status(
        &self,
        project_id: DbId,
        new_status: &str,
        observation: &str,
    ) -> Result<StatusHistoryEntry, CoreError> {
        let status = ProjectStatus::parse(new_status)?;
        let observation = observation.trim();
        if observation.is_empty() {
            return Err(CoreError::Validation("An observation is required".into()));
        }

        let project = self.require_project(project_id).await?;

        let entry = NewStatusEntry {
            status,
            observation: observation.to_string(),
            recorded_at: (self.clock)(),
        };
        let row = self
            .store
            .record_transition(project_id, project.current_status, &entry)
            .await?;

        tracing::info!(
            project_id,
            from = project.current_status.map(ProjectStatus::label),
            to = status.label(),
            history_id = row.id,
            "Project status changed"
        );
        Ok(row)
    }

    async fn require_project(&self, project_id: DbId) -> Result<ProjectStatusView, CoreError> {
        self.store
            .find_project(project_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use crate::memory_store::InMemoryStatusStore;

    fn service(store: &Arc<InMemoryStatusStore>) -> ProjectStatusService {
        ProjectStatusService::new(store.clone())
    }

    fn fixed_clock() -> Clock {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Arc::new(move || at)
    }

    #[tokio::test]
    async fn new_project_has_no_status_and_no_history() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;

        let selection = service(&store).select_project(id).await.unwrap();
        assert_eq!(selection.project.current_status, None);
        assert!(selection.history.is_empty());
    }

    #[tokio::test]
    async fn first_transition_records_one_entry() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        let svc = service(&store);

        svc.transition_status(id, "Formulación", "Initial submission")
            .await
            .unwrap();

        let history = svc.list_history(id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, ProjectStatus::Formulation);
        assert_eq!(history[0].observation, "Initial submission");

        let selection = svc.select_project(id).await.unwrap();
        assert_eq!(
            selection.project.current_status,
            Some(ProjectStatus::Formulation)
        );
    }

    #[tokio::test]
    async fn two_transitions_list_newest_first() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        let svc = service(&store);

        svc.transition_status(id, "Formulación", "Initial submission")
            .await
            .unwrap();
        svc.transition_status(id, "Activo", "Approved by committee")
            .await
            .unwrap();

        let history = svc.list_history(id).await.unwrap();
        let statuses: Vec<ProjectStatus> = history.iter().map(|h| h.status).collect();
        assert_eq!(
            statuses,
            vec![ProjectStatus::Active, ProjectStatus::Formulation]
        );
        assert_eq!(history[0].observation, "Approved by committee");
    }

    #[tokio::test]
    async fn equal_timestamps_list_latest_insert_first() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Garden").await;
        let svc = ProjectStatusService::with_clock(store.clone(), fixed_clock());

        svc.transition_status(id, "Evaluación", "first").await.unwrap();
        svc.transition_status(id, "Inactivo", "second").await.unwrap();
        svc.transition_status(id, "Activo", "third").await.unwrap();

        let observations: Vec<String> = svc
            .list_history(id)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.observation)
            .collect();
        assert_eq!(observations, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn empty_observation_performs_no_writes() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;

        let result = service(&store).transition_status(id, "Activo", "   ").await;

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn unknown_status_performs_no_writes() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;

        let result = service(&store)
            .transition_status(id, "Suspendido", "why not")
            .await;

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn missing_project_is_not_found_without_writes() {
        let store = Arc::new(InMemoryStatusStore::new());
        let svc = service(&store);

        assert_matches!(
            svc.transition_status(99, "Activo", "note").await,
            Err(CoreError::NotFound { id: 99, .. })
        );
        assert_matches!(
            svc.select_project(99).await,
            Err(CoreError::NotFound { id: 99, .. })
        );
        assert_matches!(
            svc.list_history(99).await,
            Err(CoreError::NotFound { id: 99, .. })
        );
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn same_status_transition_is_allowed() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        let svc = service(&store);

        svc.transition_status(id, "Finalizado", "done").await.unwrap();
        svc.transition_status(id, "Finalizado", "still done")
            .await
            .unwrap();
        svc.transition_status(id, "Activo", "reopened").await.unwrap();

        assert_eq!(svc.list_history(id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_history_is_repeatable() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        let svc = service(&store);
        svc.transition_status(id, "Formulación", "a").await.unwrap();
        svc.transition_status(id, "Evaluación", "b").await.unwrap();

        let reads_before = store.reads();
        let first = svc.list_history(id).await.unwrap();
        let second = svc.list_history(id).await.unwrap();

        assert_eq!(first, second);
        assert!(store.reads() > reads_before + 2, "each call must hit the store");
    }

    #[tokio::test]
    async fn observation_is_trimmed() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;

        let row = service(&store)
            .transition_status(id, "Activo", "  kickoff  ")
            .await
            .unwrap();
        assert_eq!(row.observation, "kickoff");
    }

    #[tokio::test]
    async fn append_failure_leaves_previous_status() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        let svc = service(&store);
        svc.transition_status(id, "Formulación", "a").await.unwrap();

        store.fail_history_appends.store(true, Ordering::SeqCst);
        let result = svc.transition_status(id, "Activo", "b").await;
        assert_matches!(result, Err(CoreError::Write(_)));

        store.fail_history_appends.store(false, Ordering::SeqCst);
        let selection = svc.select_project(id).await.unwrap();
        assert_eq!(
            selection.project.current_status,
            Some(ProjectStatus::Formulation)
        );
        assert_eq!(selection.history.len(), 1);
    }

    #[tokio::test]
    async fn unrecoverable_append_failure_is_partial_write() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        store.fail_history_appends.store(true, Ordering::SeqCst);
        *store.status_write_budget.lock().await = Some(1);

        let result = service(&store)
            .transition_status(id, "Activo", "b")
            .await;

        assert_matches!(result, Err(CoreError::PartialWrite { .. }));
        let project = store.find_project(id).await.unwrap().unwrap();
        assert!(project.needs_reconciliation);
    }

    #[tokio::test]
    async fn failed_append_does_not_undo_a_later_transition() {
        let store = Arc::new(InMemoryStatusStore::new());
        let id = store.insert_project("Robotics Club").await;
        let svc = service(&store);
        svc.transition_status(id, "Formulación", "a").await.unwrap();

        store.fail_history_appends.store(true, Ordering::SeqCst);
        *store.interleaved_status.lock().await = Some(ProjectStatus::Evaluation);
        let result = svc.transition_status(id, "Activo", "b").await;
        assert_matches!(result, Err(CoreError::Write(_)));

        let project = store.find_project(id).await.unwrap().unwrap();
        assert_eq!(project.current_status, Some(ProjectStatus::Evaluation));
        assert!(!project.needs_reconciliation);
    }

    #[tokio::test]
    async fn list_projects_surfaces_retrieval_errors() {
        let store = Arc::new(InMemoryStatusStore::new());
        store.insert_project("A").await;
        store.fail_reads.store(true, Ordering::SeqCst);

        assert_matches!(
            service(&store).list_projects().await,
            Err(CoreError::Retrieval(_))
        );
    }
}
