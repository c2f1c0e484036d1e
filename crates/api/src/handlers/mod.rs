pub mod auth;
pub mod field_log;
pub mod progress;
pub mod project;
pub mod project_status;
pub mod report;
pub mod user;
