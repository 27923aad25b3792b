// src/jobs/handlers/mod.rs

pub mod public;

pub use public::*;
