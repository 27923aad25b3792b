//! Authentication data models

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::ApiError;

/// Claims of a Clerk session token
#[derive(Serialize, Deserialize, Debug)]
pub struct ClerkClaims {
    /// Clerk user id
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iss: Option<String>,
    /// Authorized party: the origin the session was created on
    #[serde(default)]
    pub azp: Option<String>,
    /// Session id
    #[serde(default)]
    pub sid: Option<String>,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingToken,

    #[error("invalid token")]
    InvalidToken,

    #[error("token issued for an unauthorized party")]
    UnauthorizedParty,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized("Not authorized, Login Again".into()),
            AuthError::InvalidToken => ApiError::Unauthorized("invalid token".into()),
            AuthError::UnauthorizedParty => ApiError::Unauthorized("invalid token".into()),
        }
    }
}
