//! Token verification settings for Clerk sessions and company sessions

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::env;
use tracing::{debug, info, warn};

use super::models::{AuthError, ClerkClaims};
use super::tokens::{decode_company_token, CompanyClaims};

/// Keys and rules used to verify incoming tokens.
///
/// Clerk tokens are verified with the instance's PEM public key (RS256) when
/// `CLERK_JWT_KEY` is set, or with a shared secret (HS256) from
/// `CLERK_JWT_SECRET` for local setups.
#[derive(Clone)]
pub struct AuthConfig {
    clerk_key: DecodingKey,
    clerk_algorithm: Algorithm,
    clerk_issuer: Option<String>,
    authorized_parties: Vec<String>,
    company_secret: String,
}

impl AuthConfig {
    pub fn from_env(dev_mode: bool) -> anyhow::Result<Self> {
        let company_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "replace_with_strong_secret".to_string());

        let (clerk_key, clerk_algorithm) = if let Ok(pem) = env::var("CLERK_JWT_KEY") {
            // .env files usually carry the PEM on one line with escaped newlines
            let pem = pem.replace("\\n", "\n");
            info!("Clerk tokens verified with RS256 public key");
            (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256)
        } else if let Ok(secret) = env::var("CLERK_JWT_SECRET") {
            info!("Clerk tokens verified with HS256 shared secret");
            (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
        } else if dev_mode {
            warn!("No Clerk key configured; only usable in dev mode");
            (
                DecodingKey::from_secret(company_secret.as_bytes()),
                Algorithm::HS256,
            )
        } else {
            anyhow::bail!("CLERK_JWT_KEY or CLERK_JWT_SECRET must be set");
        };

        let authorized_parties = env::var("CLERK_AUTHORIZED_PARTIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let mut config = Self {
            clerk_key,
            clerk_algorithm,
            clerk_issuer: None,
            authorized_parties: Vec::new(),
            company_secret,
        }
        .with_authorized_parties(authorized_parties);

        if let Some(issuer) = env::var("CLERK_ISSUER").ok().filter(|s| !s.is_empty()) {
            config = config.with_issuer(issuer);
        }

        Ok(config)
    }

    /// HS256 configuration for both token kinds
    pub fn with_secrets(clerk_secret: &str, company_secret: &str) -> Self {
        Self {
            clerk_key: DecodingKey::from_secret(clerk_secret.as_bytes()),
            clerk_algorithm: Algorithm::HS256,
            clerk_issuer: None,
            authorized_parties: Vec::new(),
            company_secret: company_secret.to_string(),
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.clerk_issuer = Some(issuer.into());
        self
    }

    pub fn with_authorized_parties(mut self, parties: Vec<String>) -> Self {
        self.authorized_parties = parties;
        self
    }

    pub fn verify_clerk_token(&self, token: &str) -> Result<ClerkClaims, AuthError> {
        let mut validation = Validation::new(self.clerk_algorithm);
        if let Some(issuer) = &self.clerk_issuer {
            validation.set_issuer(&[issuer]);
        }

        let claims = decode::<ClerkClaims>(token, &self.clerk_key, &validation)
            .map_err(|e| {
                debug!(error = %e, "Clerk token validation failed");
                AuthError::InvalidToken
            })?
            .claims;

        if !self.authorized_parties.is_empty() {
            let allowed = claims
                .azp
                .as_ref()
                .map(|azp| self.authorized_parties.iter().any(|p| p == azp))
                .unwrap_or(false);
            if !allowed {
                debug!(azp = ?claims.azp, "Clerk token azp not in authorized parties");
                return Err(AuthError::UnauthorizedParty);
            }
        }

        Ok(claims)
    }

    pub fn verify_company_token(&self, token: &str) -> Result<CompanyClaims, AuthError> {
        decode_company_token(&self.company_secret, token).map_err(|e| {
            debug!(error = %e, "Company token validation failed");
            AuthError::InvalidToken
        })
    }
}
