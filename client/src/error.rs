// client/src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a readable response
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `success: false`
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Token storage error: {0}")]
    Storage(String),

    #[error("Identity provider error: {0}")]
    Identity(String),

    #[error("Session closed")]
    Cancelled,
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
