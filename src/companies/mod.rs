//! # Companies Module
//!
//! Recruiter-facing functionality:
//! - company session data
//! - job posting and visibility
//! - applicant review

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::companies_routes;
