//! Company session tokens
//!
//! Recruiters authenticate with a token sent in the `token` header. The token
//! is an HS256 JWT whose `id` claim is the company id. Tokens minted by the
//! recruiter sign-in service carry no expiry; `exp` is honoured when present.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Serialize, Deserialize)]
pub struct CompanyClaims {
    pub id: String,
    pub iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
}

pub fn issue_company_token(
    secret: &str,
    company_id: &str,
    ttl: Option<Duration>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = CompanyClaims {
        id: company_id.to_string(),
        iat: now.timestamp() as usize,
        exp: ttl.map(|ttl| (now + ttl).timestamp() as usize),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_company_token(
    secret: &str,
    token: &str,
) -> Result<CompanyClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims = HashSet::new();

    decode::<CompanyClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}
