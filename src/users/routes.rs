// src/users/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::users::handlers::{self, files};

/// Job seeker routes, authenticated with Clerk session tokens
pub fn users_routes() -> Router {
    Router::new()
        .route("/api/users/create-or-get", post(handlers::create_or_get_user))
        .route("/api/users/user", get(handlers::get_user_data))
        .route("/api/users/apply", post(handlers::apply_for_job))
        .route("/api/users/applications", get(handlers::get_user_applications))
        .route(
            "/api/users/update-resume",
            // Room for the multipart framing around a maximum-size file
            post(handlers::update_resume)
                .layer(DefaultBodyLimit::max(handlers::MAX_RESUME_BYTES + 64 * 1024)),
        )
        .route("/uploads/resumes/*path", get(files::serve_resume_file))
}
