//! Project entity model and DTOs.

use aula_core::error::CoreError;
use aula_core::project::TeamMember;
use aula_core::project_status::ProjectStatus;
use aula_core::report::ReportSource;
use aula_core::status_history::ProjectStatusView;
use aula_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub institution: Option<String>,
    pub teacher: Option<String>,
    pub area: Option<String>,
    pub objectives: Option<String>,
    pub schedule: Option<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    pub members: Json<Vec<TeamMember>>,
    pub current_status_id: Option<StatusId>,
    pub needs_reconciliation: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    pub fn current_status(&self) -> Result<Option<ProjectStatus>, CoreError> {
        self.current_status_id.map(ProjectStatus::from_id).transpose()
    }

    pub fn to_status_view(&self) -> Result<ProjectStatusView, CoreError> {
        Ok(ProjectStatusView {
            id: self.id,
            title: self.title.clone(),
            current_status: self.current_status()?,
            needs_reconciliation: self.needs_reconciliation,
        })
    }

    pub fn to_report_source(&self) -> Result<ReportSource, CoreError> {
        Ok(ReportSource {
            title: Some(self.title.clone()),
            institution: self.institution.clone(),
            teacher: self.teacher.clone(),
            status: self.current_status()?,
        })
    }
}

/// API representation: the status id is resolved to its label.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: DbId,
    pub title: String,
    pub institution: Option<String>,
    pub teacher: Option<String>,
    pub area: Option<String>,
    pub objectives: Option<String>,
    pub schedule: Option<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    pub members: Vec<TeamMember>,
    pub current_status: Option<ProjectStatus>,
    pub needs_reconciliation: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Project> for ProjectResponse {
    type Error = CoreError;

    fn try_from(p: Project) -> Result<Self, Self::Error> {
        let current_status = p.current_status()?;
        Ok(Self {
            id: p.id,
            title: p.title,
            institution: p.institution,
            teacher: p.teacher,
            area: p.area,
            objectives: p.objectives,
            schedule: p.schedule,
            budget: p.budget,
            notes: p.notes,
            members: p.members.0,
            current_status,
            needs_reconciliation: p.needs_reconciliation,
            created_at: p.created_at,
            updated_at: p.updated_at,
        })
    }
}

/// DTO for registering a new project. New projects have no status.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub institution: Option<String>,
    pub teacher: Option<String>,
    pub area: Option<String>,
    pub objectives: Option<String>,
    pub schedule: Option<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

/// DTO for updating descriptive fields. All fields are optional.
///
/// There is no status field: status changes go through the status workflow,
/// which also writes history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub institution: Option<String>,
    pub teacher: Option<String>,
    pub area: Option<String>,
    pub objectives: Option<String>,
    pub schedule: Option<String>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
    pub members: Option<Vec<TeamMember>>,
}
