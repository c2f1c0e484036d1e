use aula_core::error::CoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `aula_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Retrieval(msg) => {
            tracing::error!(error = %msg, "Store read failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "RETRIEVAL_ERROR",
                "Could not load data, please retry".to_string(),
            )
        }
        CoreError::Write(msg) => {
            tracing::error!(error = %msg, "Store write failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "WRITE_ERROR",
                "Could not save changes, please retry".to_string(),
            )
        }
        CoreError::PartialWrite { project_id, detail } => {
            tracing::error!(project_id, error = %detail, "Partial write left unreconciled");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "RECONCILIATION_REQUIRED",
                format!("Project {project_id} was only partially updated and needs review"),
            )
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            internal()
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on a `uq_`-prefixed constraint or index map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use validator::Validate;

    fn status_of(err: CoreError) -> (StatusCode, &'static str) {
        let (status, code, _) = classify_core_error(&err);
        (status, code)
    }

    #[test]
    fn store_failures_are_retryable() {
        assert_eq!(
            status_of(CoreError::Retrieval("down".into())),
            (StatusCode::SERVICE_UNAVAILABLE, "RETRIEVAL_ERROR")
        );
        assert_eq!(
            status_of(CoreError::Write("down".into())),
            (StatusCode::SERVICE_UNAVAILABLE, "WRITE_ERROR")
        );
    }

    #[test]
    fn partial_write_asks_for_reconciliation() {
        let (status, code, message) = classify_core_error(&CoreError::PartialWrite {
            project_id: 7,
            detail: "rollback failed".into(),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "RECONCILIATION_REQUIRED");
        assert!(message.contains("Project 7"));
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let (_, _, message) = classify_core_error(&CoreError::Internal("secret detail".into()));
        assert!(!message.contains("secret"));
    }

    #[derive(Validate)]
    struct Signup {
        #[validate(email)]
        email: String,
    }

    #[test]
    fn validator_errors_map_to_validation() {
        let signup = Signup {
            email: "not-an-email".into(),
        };
        let errors = signup.validate().unwrap_err();
        assert_matches!(
            AppError::from(errors),
            AppError::Core(CoreError::Validation(msg)) if msg.contains("email")
        );
    }
}
