// src/users/handlers/files.rs
//! Serving of locally stored resumes

use axum::{
    extract::{Extension, Path},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::common::{ApiError, AppState, IdKind};

/// GET /uploads/resumes/*path - Serve a resume from the local storage directory
pub async fn serve_resume_file(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let state = state_lock.read().await.clone();

    // Only names produced by the upload handler are served
    let is_stored_resume = path
        .strip_suffix(".pdf")
        .map(|id| IdKind::Resume.matches(id))
        .unwrap_or(false);
    if !is_stored_resume {
        return Err(ApiError::BadRequest("Invalid file path".to_string()));
    }

    let file_path = state.resume_storage.local_dir().join(&path);

    let content = match tokio::fs::read(&file_path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound("File not found".to_string()));
        }
        Err(_) => return Err(ApiError::InternalServer("Failed to read file".to_string())),
    };

    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/pdf")], content))
}
