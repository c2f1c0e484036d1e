use std::sync::Arc;

use aula_core::blob::BlobStore;
use aula_core::status_service::ProjectStatusService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything inside is behind `Arc` or is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: aula_db::DbPool,
    /// Server configuration (JWT settings, upload limits, password policy).
    pub config: Arc<ServerConfig>,
    /// Status transitions and history, backed by a [`aula_core::status_store::StatusStore`].
    pub status_service: ProjectStatusService,
    /// Where uploaded documents and photos are written.
    pub blob_store: Arc<dyn BlobStore>,
}
