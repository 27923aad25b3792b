use super::models::{
    ApplicationStatus, ChangeStatusRequest, ChangeVisibilityRequest, CompanyApplicationResponse,
    CompanyApplicationRow, JobWithApplicants, PostJobRequest,
};
use super::validators::{ChangeStatusValidator, PostJobValidator};
use crate::auth::CompanySession;
use crate::common::{generate_job_id, now_millis, ApiError, AppState, Validator};
use crate::jobs::models::Job;
use axum::{extract::Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

const JOB_COLUMNS: &str =
    "id, title, description, location, category, level, salary, date, visible, company_id";

async fn fetch_job(state: &AppState, job_id: &str) -> Result<Option<Job>, ApiError> {
    sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS))
        .bind(job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)
}

/// GET /api/company/company - Company behind the session token
pub async fn get_company_data(session: CompanySession) -> Result<Json<Value>, ApiError> {
    Ok(Json(json!({ "success": true, "company": session.company })))
}

/// POST /api/company/post-job - Publish a new job for the company
pub async fn post_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: CompanySession,
    Json(request): Json<PostJobRequest>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = PostJobValidator.validate(&request);
    if !validation.is_valid {
        warn!(
            company_id = %session.company.id,
            errors = ?validation.errors,
            "Job posting validation failed"
        );
        return Err(ApiError::from(validation));
    }

    let job = Job {
        id: generate_job_id(),
        title: request.title.trim().to_string(),
        description: request.description,
        location: request.location.trim().to_string(),
        category: request.category,
        level: request.level,
        salary: request.salary,
        date: now_millis(),
        visible: true,
        company_id: session.company.id.clone(),
    };

    sqlx::query(
        r#"
        INSERT INTO jobs (id, title, description, location, category, level, salary, date, visible, company_id)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&job.id)
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.location)
    .bind(&job.category)
    .bind(&job.level)
    .bind(job.salary)
    .bind(job.date)
    .bind(job.visible)
    .bind(&job.company_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(company_id = %job.company_id, job_id = %job.id, "Job posted");

    Ok(Json(json!({ "success": true, "newJob": job })))
}

/// GET /api/company/list-jobs - Company jobs with their applicant counts
pub async fn list_company_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: CompanySession,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let jobs_data = sqlx::query_as::<_, JobWithApplicants>(
        r#"
        SELECT
            j.id, j.title, j.description, j.location, j.category, j.level,
            j.salary, j.date, j.visible, j.company_id,
            (SELECT COUNT(*) FROM job_applications a WHERE a.job_id = j.id) AS applicants
        FROM jobs j
        WHERE j.company_id = ?
        ORDER BY j.date DESC
        "#,
    )
    .bind(&session.company.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(json!({ "success": true, "jobsData": jobs_data })))
}

/// GET /api/company/applicants - Applications received by the company
pub async fn get_company_applicants(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: CompanySession,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows = sqlx::query_as::<_, CompanyApplicationRow>(
        r#"
        SELECT
            a.id, a.user_id, a.company_id, a.job_id, a.status, a.date,
            u.name AS user_name, u.image AS user_image, u.resume AS user_resume,
            j.title AS job_title, j.description AS job_description,
            j.location AS job_location, j.category AS job_category,
            j.level AS job_level, j.salary AS job_salary
        FROM job_applications a
        JOIN users u ON u.id = a.user_id
        JOIN jobs j ON j.id = a.job_id
        WHERE a.company_id = ?
        ORDER BY a.date DESC
        "#,
    )
    .bind(&session.company.id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let applications: Vec<CompanyApplicationResponse> =
        rows.into_iter().map(CompanyApplicationResponse::from).collect();

    Ok(Json(json!({ "success": true, "applications": applications })))
}

/// POST /api/company/change-status - Accept or reject an application
pub async fn change_application_status(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: CompanySession,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    ChangeStatusValidator.validate(&request).into_result()?;
    let status: ApplicationStatus = request
        .status
        .parse()
        .map_err(ApiError::ValidationError)?;

    let result = sqlx::query("UPDATE job_applications SET status = ? WHERE id = ? AND company_id = ?")
        .bind(status.as_str())
        .bind(&request.id)
        .bind(&session.company.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 0 {
        warn!(
            company_id = %session.company.id,
            application_id = %request.id,
            "Status change for unknown or foreign application"
        );
        return Err(ApiError::NotFound("Application Not Found".to_string()));
    }

    info!(
        company_id = %session.company.id,
        application_id = %request.id,
        status = %status,
        "Application status changed"
    );

    Ok(Json(json!({ "success": true, "message": "Status Changed" })))
}

/// POST /api/company/change-visibility - Show or hide one of the company's jobs
pub async fn change_job_visibility(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: CompanySession,
    Json(request): Json<ChangeVisibilityRequest>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    // Single statement so concurrent toggles each flip the stored value
    let result = sqlx::query("UPDATE jobs SET visible = NOT visible WHERE id = ? AND company_id = ?")
        .bind(&request.id)
        .bind(&session.company.id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let job = fetch_job(&state, &request.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job Not Found".to_string()))?;

    if result.rows_affected() == 0 {
        warn!(
            company_id = %session.company.id,
            job_id = %job.id,
            "Visibility change attempted on another company's job"
        );
        return Err(ApiError::Forbidden("Not authorized to modify this job".to_string()));
    }

    info!(job_id = %job.id, visible = job.visible, "Job visibility changed");

    Ok(Json(json!({ "success": true, "job": job })))
}
