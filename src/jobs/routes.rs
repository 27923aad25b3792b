// src/jobs/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Public job board routes
///
/// # Routes
/// - `GET /api/jobs` - all visible jobs
/// - `GET /api/jobs/:id` - one job
pub fn jobs_routes() -> Router {
    Router::new()
        .route("/api/jobs", get(handlers::get_jobs))
        .route("/api/jobs/:id", get(handlers::get_job_by_id))
}
