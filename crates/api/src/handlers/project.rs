//! Handlers for the `/projects` resource (registration and descriptive fields).

use aula_core::error::CoreError;
use aula_core::project::{validate_budget, validate_members, validate_project};
use aula_core::types::DbId;
use aula_core::validation::require_text;
use aula_db::models::project::{CreateProject, ProjectResponse, UpdateProject};
use aula_db::repositories::ProjectRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/projects
///
/// Register a project. It starts with no status.
pub async fn create_project(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectResponse>>)> {
    validate_project(&input.title, &input.members)?;
    validate_budget(input.budget)?;
    input.title = input.title.trim().to_string();

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, user_id = user.user_id, "Project registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: project.try_into()?,
        }),
    ))
}

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<ProjectResponse>>>> {
    let projects = ProjectRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(ProjectResponse::try_from)
        .collect::<Result<Vec<_>, CoreError>>()?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectResponse>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: project.try_into()?,
    }))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update of descriptive fields. Status changes go through
/// `POST /projects/{id}/status`.
pub async fn update_project(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectResponse>>> {
    if let Some(title) = input.title.as_deref() {
        input.title = Some(require_text("title", title)?.to_string());
    }
    if let Some(members) = input.members.as_deref() {
        validate_members(members)?;
    }
    validate_budget(input.budget)?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: project.try_into()?,
    }))
}
