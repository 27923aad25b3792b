// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::common::dev_mode::DevModeConfig;
use crate::services::ResumeStorage;

/// Application state containing database pool, storage, and auth configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub resume_storage: Arc<ResumeStorage>,
    pub auth: AuthConfig,
    pub dev_mode: DevModeConfig,
}
