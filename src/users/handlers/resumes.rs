// src/users/handlers/resumes.rs

use axum::{
    extract::{multipart::MultipartError, Extension, Multipart},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::accounts::require_user;
use crate::auth::ClerkUser;
use crate::common::{ApiError, AppState};

pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/users/update-resume - Upload the multipart field `resume` (PDF)
pub async fn update_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: ClerkUser,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    info!(user_id = %authed.user_id, "User uploading resume");

    require_user(&state.db, &authed.user_id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        if field.name() != Some("resume") {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume.pdf").to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            warn!(user_id = %authed.user_id, filename = %filename, "Rejected non-PDF resume");
            return Err(ApiError::BadRequest(
                "Only PDF files are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Invalid file", e))?;

        if data.is_empty() {
            return Err(ApiError::BadRequest("Resume file is empty".to_string()));
        }
        if data.len() > MAX_RESUME_BYTES {
            return Err(too_large());
        }

        let url = state
            .resume_storage
            .store_resume(&authed.user_id, data.to_vec())
            .await?;

        sqlx::query("UPDATE users SET resume = ? WHERE id = ?")
            .bind(&url)
            .bind(&authed.user_id)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(user_id = %authed.user_id, resume_url = %url, "Resume updated");

        return Ok(Json(json!({ "success": true, "message": "Resume Updated" })));
    }

    Err(ApiError::BadRequest("No resume file provided".to_string()))
}

fn too_large() -> ApiError {
    ApiError::PayloadTooLarge(format!(
        "Resume must be at most {} MB",
        MAX_RESUME_BYTES / (1024 * 1024)
    ))
}

/// Bodies cut off by the route's body limit surface as multipart errors
fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large()
    } else {
        ApiError::BadRequest(format!("{}: {}", context, e.body_text()))
    }
}
