// src/users/handlers/mod.rs

pub mod accounts;
pub mod applications;
pub mod files;
pub mod resumes;

pub use accounts::*;
pub use applications::*;
pub use resumes::*;
