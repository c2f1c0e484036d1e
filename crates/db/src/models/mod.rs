//! Row structs (`FromRow`) and the create/update DTOs for each table.

pub mod field_log;
pub mod progress_entry;
pub mod project;
pub mod status_history;
pub mod user;
