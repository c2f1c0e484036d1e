//! Handler for the project report.

use aula_core::error::CoreError;
use aula_core::report::{build_rows, ReportField, ReportRow};
use aula_core::types::Timestamp;
use aula_db::repositories::ProjectRepo;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /reports/projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub field: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub generated_at: Timestamp,
    pub field: ReportField,
    pub search: String,
    pub rows: Vec<ReportRow>,
}

/// GET /api/v1/reports/projects?field=&search=
pub async fn project_report(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<DataResponse<ProjectReport>>> {
    let field: ReportField = params.field.as_deref().unwrap_or_default().parse()?;
    let search = params.search.unwrap_or_default().trim().to_string();

    let sources = ProjectRepo::list(&state.pool)
        .await?
        .iter()
        .map(|p| p.to_report_source())
        .collect::<Result<Vec<_>, CoreError>>()?;
    let rows = build_rows(&sources, field, &search);

    Ok(Json(DataResponse {
        data: ProjectReport {
            generated_at: chrono::Utc::now(),
            field,
            search,
            rows,
        },
    }))
}
