//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use super::models::AuthError;
use crate::common::{safe_token_log, ApiError, AppState};
use crate::companies::models::Company;

/// Header carrying the company session token
pub const COMPANY_TOKEN_HEADER: &str = "token";

async fn app_state<S>(parts: &mut Parts, state: &S) -> Result<AppState, ApiError>
where
    S: Send + Sync,
{
    let Extension(state_lock): Extension<Arc<RwLock<AppState>>> =
        Extension::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

    let app_state = state_lock.read().await.clone();
    Ok(app_state)
}

/// Job seeker authenticated by a Clerk session token
///
/// The user row may not exist yet: create-or-get is the call that makes it.
#[derive(Debug)]
pub struct ClerkUser {
    pub user_id: String,
    pub session_id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for ClerkUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        if app_state.dev_mode.is_enabled() {
            debug!(user_id = %app_state.dev_mode.user_id, "DEV MODE: Clerk verification bypassed");
            return Ok(ClerkUser {
                user_id: app_state.dev_mode.user_id.clone(),
                session_id: None,
            });
        }

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                warn!("Authentication failed: missing Authorization header");
                AuthError::MissingToken
            })?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken.into());
        }

        let claims = app_state.auth.verify_clerk_token(token).map_err(|e| {
            warn!(error = %e, token = %safe_token_log(token), "Clerk token rejected");
            e
        })?;

        debug!(user_id = %claims.sub, "Clerk session verified");

        Ok(ClerkUser {
            user_id: claims.sub,
            session_id: claims.sid,
        })
    }
}

/// Recruiter authenticated by the `token` header
#[derive(Debug)]
pub struct CompanySession {
    pub company: Company,
}

#[async_trait]
impl<S> FromRequestParts<S> for CompanySession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = app_state(parts, state).await?;

        let token = parts
            .headers
            .get(COMPANY_TOKEN_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!("Company authentication failed: missing token header");
                AuthError::MissingToken
            })?;

        let claims = app_state.auth.verify_company_token(token).map_err(|e| {
            warn!(error = %e, token = %safe_token_log(token), "Company token rejected");
            e
        })?;

        let company = sqlx::query_as::<_, Company>(
            "SELECT id, name, email, image, created_at FROM companies WHERE id = ?",
        )
        .bind(&claims.id)
        .fetch_optional(&app_state.db)
        .await
        .map_err(|e| {
            error!(error = %e, company_id = %claims.id, "Database error during company lookup");
            ApiError::DatabaseError(e)
        })?;

        match company {
            Some(company) => {
                debug!(company_id = %company.id, "Company session verified");
                Ok(CompanySession { company })
            }
            None => {
                warn!(company_id = %claims.id, "Company token references unknown company");
                Err(ApiError::Unauthorized("Not authorized, Login Again".into()))
            }
        }
    }
}
