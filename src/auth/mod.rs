//! # Auth Module
//!
//! Token verification for the two kinds of callers:
//! - job seekers, with Clerk session tokens (`Authorization: Bearer ...`)
//! - recruiters, with company session tokens (`token` header)
//!
//! Tokens are issued elsewhere; this module only verifies them.

pub mod config;
pub mod extractors;
pub mod models;
pub mod tokens;

#[cfg(test)]
mod tests;

pub use config::AuthConfig;
pub use extractors::{ClerkUser, CompanySession, COMPANY_TOKEN_HEADER};
