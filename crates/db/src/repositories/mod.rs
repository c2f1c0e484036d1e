//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` (or any Postgres executor, for the calls the
//! status store runs inside a transaction) as the first argument.

pub mod field_log_repo;
pub mod progress_entry_repo;
pub mod project_repo;
pub mod status_history_repo;
pub mod user_repo;

pub use field_log_repo::FieldLogRepo;
pub use progress_entry_repo::ProgressEntryRepo;
pub use project_repo::ProjectRepo;
pub use status_history_repo::StatusHistoryRepo;
pub use user_repo::UserRepo;
