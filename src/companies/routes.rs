use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

/// Recruiter routes, all authenticated by the `token` header
pub fn companies_routes() -> Router {
    Router::new()
        .route("/api/company/company", get(handlers::get_company_data))
        .route("/api/company/post-job", post(handlers::post_job))
        .route("/api/company/list-jobs", get(handlers::list_company_jobs))
        .route("/api/company/applicants", get(handlers::get_company_applicants))
        .route(
            "/api/company/change-status",
            post(handlers::change_application_status),
        )
        .route(
            "/api/company/change-visibility",
            post(handlers::change_job_visibility),
        )
}
