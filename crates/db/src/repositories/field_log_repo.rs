//! Repository for the `field_logs` table.

use sqlx::PgPool;

use crate::models::field_log::{CreateFieldLog, FieldLog};

const COLUMNS: &str = "id, log_date, location, observations, photo_url, user_email, created_at";

pub struct FieldLogRepo;

impl FieldLogRepo {
    pub async fn create(pool: &PgPool, input: &CreateFieldLog) -> Result<FieldLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO field_logs (log_date, location, observations, photo_url, user_email)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FieldLog>(&query)
            .bind(input.log_date)
            .bind(&input.location)
            .bind(&input.observations)
            .bind(&input.photo_url)
            .bind(&input.user_email)
            .fetch_one(pool)
            .await
    }

    /// Most recently filed first.
    pub async fn list(pool: &PgPool) -> Result<Vec<FieldLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM field_logs ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, FieldLog>(&query).fetch_all(pool).await
    }
}
