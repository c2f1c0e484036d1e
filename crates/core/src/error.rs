use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The backing store could not be read.
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// The backing store rejected a write. Nothing was left half-applied.
    #[error("Write failed: {0}")]
    Write(String),

    /// A multi-step write stopped halfway and could not be rolled back.
    ///
    /// The project is flagged for manual reconciliation.
    #[error("Partial write on project {project_id}: {detail}")]
    PartialWrite { project_id: DbId, detail: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
