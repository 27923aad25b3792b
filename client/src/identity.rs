// client/src/identity.rs
//! Signed-in user identity as exposed by the auth provider (Clerk)

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::models::NewUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_addresses: Vec<String>,
    pub image_url: String,
}

impl Identity {
    /// Fields sent when the user record has to be created
    pub fn new_user(&self) -> ClientResult<NewUser> {
        let email = self
            .email_addresses
            .first()
            .cloned()
            .ok_or_else(|| ClientError::Identity(format!("user {} has no email address", self.id)))?;

        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(NewUser {
            user_id: self.id.clone(),
            name,
            email,
            image: self.image_url.clone(),
        })
    }
}

/// Source of bearer tokens for the signed-in user
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn token(&self) -> ClientResult<String>;
}

/// Provider handing out a fixed token, for scripts and tests
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    token: String,
}

impl StaticIdentity {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn token(&self) -> ClientResult<String> {
        Ok(self.token.clone())
    }
}
