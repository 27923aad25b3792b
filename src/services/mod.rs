// src/services/mod.rs
//
// Shared services used across domain modules

pub mod storage;

pub use storage::{ResumeStorage, StorageError};
