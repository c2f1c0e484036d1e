//! Handlers for project status: selection, transitions, and history.
//!
//! All work is delegated to [`aula_core::status_service::ProjectStatusService`];
//! these handlers only adapt HTTP input and output.

use aula_core::status_history::{ProjectSelection, ProjectStatusView, StatusHistoryEntry};
use aula_core::types::DbId;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /projects/{id}/status`.
///
/// Both fields are optional at the JSON level so that a missing value
/// surfaces as a validation error rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub status: Option<String>,
    pub observation: Option<String>,
}

/// GET /api/v1/project-status
pub async fn list_projects(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<ProjectStatusView>>>> {
    let projects = state.status_service.list_projects().await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}/status
pub async fn select_project(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectSelection>>> {
    let selection = state.status_service.select_project(id).await?;
    Ok(Json(DataResponse { data: selection }))
}

/// GET /api/v1/projects/{id}/status/history
pub async fn list_history(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StatusHistoryEntry>>>> {
    let history = state.status_service.list_history(id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// POST /api/v1/projects/{id}/status
///
/// Returns the new history row with 201 Created.
pub async fn transition_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<StatusHistoryEntry>>)> {
    let entry = state
        .status_service
        .transition_status(
            id,
            input.status.as_deref().unwrap_or_default(),
            input.observation.as_deref().unwrap_or_default(),
        )
        .await?;
    tracing::debug!(
        project_id = id,
        user_id = user.user_id,
        entry_id = entry.id,
        "Status changed via API"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}
