// src/jobs/handlers/public.rs

use axum::{
    extract::{Extension, Path},
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::common::{ApiError, AppState};
use crate::jobs::models::*;

/// GET /api/jobs - List every visible job with its company
///
/// No pagination, ordering guarantees or filtering: clients filter locally.
pub async fn get_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let query = format!("{} WHERE j.visible = 1", JOB_WITH_COMPANY_SELECT);
    let rows = sqlx::query_as::<_, JobWithCompanyRow>(&query)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let jobs: Vec<JobResponse> = rows.into_iter().map(JobResponse::from).collect();

    debug!(job_count = jobs.len(), "Loaded visible jobs");

    Ok(Json(json!({ "success": true, "jobs": jobs })))
}

/// GET /api/jobs/:id - Single job with its company
pub async fn get_job_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let query = format!("{} WHERE j.id = ?", JOB_WITH_COMPANY_SELECT);
    let job = sqlx::query_as::<_, JobWithCompanyRow>(&query)
        .bind(&job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .map(JobResponse::from)
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    debug!(job_id = %job_id, job_title = %job.title, "Loaded job details");

    Ok(Json(json!({ "success": true, "job": job })))
}
