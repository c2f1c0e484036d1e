/// Primary keys are PostgreSQL BIGSERIAL; the in-memory store hands out the same range.
pub type DbId = i64;

/// Lookup-table ids (`project_statuses`) are SMALLINT.
pub type StatusId = i16;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
