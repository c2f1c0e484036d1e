//! Status history records and the read models the status service returns.

use std::cmp::Ordering;

use serde::Serialize;

use crate::project_status::ProjectStatus;
use crate::types::{DbId, Timestamp};

/// One immutable row of a project's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusHistoryEntry {
    pub id: DbId,
    pub project_id: DbId,
    pub status: ProjectStatus,
    pub observation: String,
    pub recorded_at: Timestamp,
}

/// A history row that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStatusEntry {
    pub status: ProjectStatus,
    pub observation: String,
    pub recorded_at: Timestamp,
}

/// The slice of a project the status workflow cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatusView {
    pub id: DbId,
    pub title: String,
    /// `None` until the first transition.
    pub current_status: Option<ProjectStatus>,
    pub needs_reconciliation: bool,
}

/// A project together with its full history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSelection {
    pub project: ProjectStatusView,
    pub history: Vec<StatusHistoryEntry>,
}

/// Newest-first ordering: later `recorded_at` wins, equal timestamps fall
/// back to the higher (later inserted) id.
pub fn newest_first(a: &StatusHistoryEntry, b: &StatusHistoryEntry) -> Ordering {
    b.recorded_at
        .cmp(&a.recorded_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Sort history in place, newest first.
pub fn sort_newest_first(entries: &mut [StatusHistoryEntry]) {
    entries.sort_by(newest_first);
}
