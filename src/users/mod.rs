// src/users/mod.rs
//! Job seeker accounts, applications and resumes

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;


pub use routes::users_routes;
