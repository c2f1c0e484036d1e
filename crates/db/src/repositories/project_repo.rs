//! Repository for the `projects` table.

use aula_core::project_status::ProjectStatus;
use aula_core::types::DbId;
use sqlx::types::Json;
use sqlx::{Executor, PgPool, Postgres};

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, institution, teacher, area, objectives, schedule, budget, \
                       notes, members, current_status_id, needs_reconciliation, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project with no status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (title, institution, teacher, area, objectives, schedule, budget, notes, members)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.title.trim())
            .bind(&input.institution)
            .bind(&input.teacher)
            .bind(&input.area)
            .bind(&input.objectives)
            .bind(&input.schedule)
            .bind(input.budget)
            .bind(&input.notes)
            .bind(Json(&input.members))
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Project>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update descriptive fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                institution = COALESCE($3, institution),
                teacher = COALESCE($4, teacher),
                area = COALESCE($5, area),
                objectives = COALESCE($6, objectives),
                schedule = COALESCE($7, schedule),
                budget = COALESCE($8, budget),
                notes = COALESCE($9, notes),
                members = COALESCE($10, members)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.institution)
            .bind(&input.teacher)
            .bind(&input.area)
            .bind(&input.objectives)
            .bind(&input.schedule)
            .bind(input.budget)
            .bind(&input.notes)
            .bind(input.members.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Set (or clear) the current status. Returns `true` if the project exists.
    pub async fn set_current_status<'e, E>(
        executor: E,
        id: DbId,
        status: Option<ProjectStatus>,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE projects SET current_status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(status.map(ProjectStatus::id))
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a project whose status and history disagree.
    pub async fn flag_for_reconciliation(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE projects SET needs_reconciliation = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
