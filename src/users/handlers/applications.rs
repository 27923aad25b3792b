// src/users/handlers/applications.rs

use axum::extract::{Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::accounts::require_user;
use crate::auth::ClerkUser;
use crate::common::{generate_application_id, now_millis, ApiError, AppState, Validator};
use crate::users::models::{ApplyJobRequest, UserApplicationResponse, UserApplicationRow};
use crate::users::validators::ApplyJobValidator;

/// POST /api/users/apply - Apply the session's user to a job
pub async fn apply_for_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: ClerkUser,
    Json(request): Json<ApplyJobRequest>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.user_id, job_id = %request.job_id, "Applying for job");

    ApplyJobValidator.validate(&request).into_result()?;

    require_user(&state.db, &authed.user_id).await?;

    let company_id: String = sqlx::query_scalar("SELECT company_id FROM jobs WHERE id = ?")
        .bind(&request.job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("Job Not Found".to_string()))?;

    // The (user_id, job_id) unique constraint turns a second apply into a no-op
    let result = sqlx::query(
        r#"
        INSERT INTO job_applications (id, user_id, company_id, job_id, status, date)
        VALUES (?, ?, ?, ?, 'Pending', ?)
        ON CONFLICT(user_id, job_id) DO NOTHING
        "#,
    )
    .bind(generate_application_id())
    .bind(&authed.user_id)
    .bind(&company_id)
    .bind(&request.job_id)
    .bind(now_millis())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        warn!(user_id = %authed.user_id, job_id = %request.job_id, "Duplicate application");
        return Err(ApiError::Conflict("Already Applied".to_string()));
    }

    info!(user_id = %authed.user_id, job_id = %request.job_id, "Application created");

    Ok(Json(json!({ "success": true, "message": "Applied Successfully" })))
}

/// GET /api/users/applications - The session's applications, newest first
pub async fn get_user_applications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: ClerkUser,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows = sqlx::query_as::<_, UserApplicationRow>(
        r#"
        SELECT
            a.id, a.user_id, a.status, a.date,
            c.id AS company_id, c.name AS company_name,
            c.email AS company_email, c.image AS company_image,
            j.id AS job_id, j.title AS job_title, j.description AS job_description,
            j.location AS job_location, j.category AS job_category,
            j.level AS job_level, j.salary AS job_salary
        FROM job_applications a
        JOIN companies c ON c.id = a.company_id
        JOIN jobs j ON j.id = a.job_id
        WHERE a.user_id = ?
        ORDER BY a.date DESC
        "#,
    )
    .bind(&authed.user_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let applications: Vec<UserApplicationResponse> =
        rows.into_iter().map(UserApplicationResponse::from).collect();

    Ok(Json(json!({ "success": true, "applications": applications })))
}
