// client/src/config.rs
//! Client configuration from the environment (`.env` honoured)

use std::env;
use std::path::PathBuf;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
const DEFAULT_STORAGE_FILE: &str = ".jobboard/storage.json";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn new(backend_url: impl Into<String>, storage_path: impl Into<PathBuf>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            storage_path: storage_path.into(),
        }
    }

    /// `VITE_BACKEND_URL` (or `BACKEND_URL`) for the API and `JOBBOARD_STORAGE`
    /// for the token store file.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let backend_url = env::var("VITE_BACKEND_URL")
            .or_else(|_| env::var("BACKEND_URL"))
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());

        let storage_path = env::var("JOBBOARD_STORAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_FILE));

        Self::new(backend_url, storage_path)
    }
}
