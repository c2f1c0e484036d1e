//! In-memory [`StatusStore`] with call counters and failure injection.
//!
//! Behaves like a document store without transactions, so it exercises the
//! compensating path of [`StatusStore::record_transition`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::project_status::ProjectStatus;
use crate::status_history::{
    sort_newest_first, NewStatusEntry, ProjectStatusView, StatusHistoryEntry,
};
use crate::status_store::StatusStore;
use crate::types::DbId;

#[derive(Default)]
struct State {
    /// Insertion order is kept so `list_projects` is stable.
    projects: Vec<ProjectStatusView>,
    history: HashMap<DbId, Vec<StatusHistoryEntry>>,
    next_project_id: DbId,
    next_history_id: DbId,
}

#[derive(Default)]
pub struct InMemoryStatusStore {
    state: Mutex<State>,
    pub read_calls: AtomicU64,
    pub write_calls: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_history_appends: AtomicBool,
    /// Remaining status writes before they start failing. `None` = unlimited.
    pub status_write_budget: Mutex<Option<u64>>,
    /// When a history append is rejected, first move the project to this
    /// status, as if another transition had landed in between.
    pub interleaved_status: Mutex<Option<ProjectStatus>>,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a project with no status, returning its id.
    pub async fn insert_project(&self, title: &str) -> DbId {
        let mut state = self.state.lock().await;
        state.next_project_id += 1;
        let id = state.next_project_id;
        state.projects.push(ProjectStatusView {
            id,
            title: title.to_string(),
            current_status: None,
            needs_reconciliation: false,
        });
        id
    }

    pub fn writes(&self) -> u64 {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> u64 {
        self.read_calls.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> Result<(), CoreError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CoreError::Retrieval("in-memory store is unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list_projects(&self) -> Result<Vec<ProjectStatusView>, CoreError> {
        self.check_reads()?;
        Ok(self.state.lock().await.projects.clone())
    }

    async fn find_project(&self, project_id: DbId) -> Result<Option<ProjectStatusView>, CoreError> {
        self.check_reads()?;
        let state = self.state.lock().await;
        Ok(state.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn list_history(&self, project_id: DbId) -> Result<Vec<StatusHistoryEntry>, CoreError> {
        self.check_reads()?;
        let state = self.state.lock().await;
        let mut rows = state.history.get(&project_id).cloned().unwrap_or_default();
        sort_newest_first(&mut rows);
        Ok(rows)
    }

    async fn set_current_status(
        &self,
        project_id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<(), CoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut budget = self.status_write_budget.lock().await;
            match *budget {
                Some(0) => {
                    return Err(CoreError::Write("status write rejected".into()));
                }
                Some(ref mut remaining) => *remaining -= 1,
                None => {}
            }
        }
        let mut state = self.state.lock().await;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            })?;
        project.current_status = status;
        Ok(())
    }

    async fn append_history(
        &self,
        project_id: DbId,
        entry: &NewStatusEntry,
    ) -> Result<StatusHistoryEntry, CoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_history_appends.load(Ordering::SeqCst) {
            if let Some(status) = self.interleaved_status.lock().await.take() {
                let mut state = self.state.lock().await;
                if let Some(project) = state.projects.iter_mut().find(|p| p.id == project_id) {
                    project.current_status = Some(status);
                }
            }
            return Err(CoreError::Write("history append rejected".into()));
        }
        let mut state = self.state.lock().await;
        if !state.projects.iter().any(|p| p.id == project_id) {
            return Err(CoreError::NotFound {
                entity: "Project",
                id: project_id,
            });
        }
        state.next_history_id += 1;
        let row = StatusHistoryEntry {
            id: state.next_history_id,
            project_id,
            status: entry.status,
            observation: entry.observation.clone(),
            recorded_at: entry.recorded_at,
        };
        state.history.entry(project_id).or_default().push(row.clone());
        Ok(row)
    }

    async fn flag_for_reconciliation(&self, project_id: DbId) -> Result<(), CoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        if let Some(project) = state.projects.iter_mut().find(|p| p.id == project_id) {
            project.needs_reconciliation = true;
        }
        Ok(())
    }
}
