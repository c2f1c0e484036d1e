//! Domain layer for the school project tracker.
//!
//! No database types live here: the status workflow talks to storage through
//! [`status_store::StatusStore`] and uploads go through [`blob::BlobStore`].

pub mod blob;
pub mod error;
pub mod memory_store;
pub mod project;
pub mod project_status;
pub mod report;
pub mod roles;
pub mod status_history;
pub mod status_service;
pub mod status_store;
pub mod types;
pub mod validation;
