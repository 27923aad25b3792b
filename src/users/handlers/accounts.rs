// src/users/handlers/accounts.rs

use axum::extract::{Extension, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::auth::ClerkUser;
use crate::common::{safe_email_log, ApiError, AppState, Validator};
use crate::users::models::{CreateOrGetUserRequest, User, USER_COLUMNS};
use crate::users::validators::CreateOrGetUserValidator;

pub(crate) async fn find_user(db: &SqlitePool, user_id: &str) -> Result<Option<User>, ApiError> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(ApiError::DatabaseError)
}

pub(crate) async fn require_user(db: &SqlitePool, user_id: &str) -> Result<User, ApiError> {
    find_user(db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User Not Found".to_string()))
}

/// Inserts the user unless a row with the same id exists, then reads it back.
///
/// A single statement decides the insert, so concurrent first logins of the
/// same identity converge on one row.
pub(crate) async fn upsert_user(
    db: &SqlitePool,
    request: &CreateOrGetUserRequest,
) -> Result<User, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, name, email, image, resume)
        VALUES (?, ?, ?, ?, '')
        ON CONFLICT(id) DO NOTHING
        "#,
    )
    .bind(&request.user_id)
    .bind(request.name.as_deref().map(str::trim).unwrap_or(""))
    .bind(request.email.trim())
    .bind(request.image.as_deref().unwrap_or(""))
    .execute(db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if result.rows_affected() == 1 {
        info!(
            user_id = %request.user_id,
            email = %safe_email_log(&request.email),
            "User created"
        );
    } else {
        debug!(user_id = %request.user_id, "User already exists");
    }

    require_user(db, &request.user_id).await
}

/// POST /api/users/create-or-get - Atomic lookup-or-insert of the session's user
pub async fn create_or_get_user(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: ClerkUser,
    Json(request): Json<CreateOrGetUserRequest>,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let validation = CreateOrGetUserValidator.validate(&request);
    if !validation.is_valid {
        warn!(
            user_id = %authed.user_id,
            errors = ?validation.errors,
            "Create-or-get validation failed"
        );
        return Err(ApiError::from(validation));
    }

    if request.user_id != authed.user_id {
        warn!(
            session_user = %authed.user_id,
            requested_user = %request.user_id,
            "Create-or-get for a different user than the session"
        );
        return Err(ApiError::Forbidden(
            "User id does not match the authenticated session".to_string(),
        ));
    }

    let user = upsert_user(&state.db, &request).await?;

    Ok(Json(json!({ "success": true, "user": user })))
}

/// GET /api/users/user - The session's user record
pub async fn get_user_data(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: ClerkUser,
) -> Result<Json<Value>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = require_user(&state.db, &authed.user_id).await?;

    debug!(user_id = %user.id, session_id = ?authed.session_id, "Loaded user data");

    Ok(Json(json!({ "success": true, "user": user })))
}
