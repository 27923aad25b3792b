// src/services/storage.rs
//! Resume file storage: local disk or S3.

use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use crate::common::generate_resume_id;

const MAX_NAME_ATTEMPTS: usize = 5;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage not configured: {0}")]
    NotConfigured(String),

    #[error("S3 operation failed: {0}")]
    S3Error(String),

    #[error("no free file name after {0} attempts")]
    NamesExhausted(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct S3Config {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    pub cloudfront_domain: Option<String>,
}

impl S3Config {
    pub fn from_env() -> Result<Self, StorageError> {
        let access_key_id = env::var("AWS_ACCESS_KEY_ID")
            .map_err(|_| StorageError::NotConfigured("AWS_ACCESS_KEY_ID".to_string()))?;
        let secret_access_key = env::var("AWS_SECRET_ACCESS_KEY")
            .map_err(|_| StorageError::NotConfigured("AWS_SECRET_ACCESS_KEY".to_string()))?;
        let bucket = env::var("AWS_S3_BUCKET_NAME")
            .ok()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| StorageError::NotConfigured("AWS_S3_BUCKET_NAME".to_string()))?;
        let region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let cloudfront_domain = env::var("AWS_CLOUDFRONT_DOMAIN")
            .ok()
            .filter(|d| !d.is_empty());

        Ok(Self {
            access_key_id,
            secret_access_key,
            region,
            bucket,
            cloudfront_domain,
        })
    }

    /// Public URL of an object, through CloudFront when configured
    pub fn object_url(&self, key: &str) -> String {
        match &self.cloudfront_domain {
            Some(domain) => format!("https://{}/{}", domain.trim_end_matches('/'), key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum StorageBackend {
    Local,
    S3(S3Config),
}

/// Where uploaded resumes go. S3 uploads fall back to local disk on failure.
#[derive(Debug, Clone)]
pub struct ResumeStorage {
    backend: StorageBackend,
    local_dir: PathBuf,
    public_url: String,
}

impl ResumeStorage {
    pub fn local(local_dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Local,
            local_dir: local_dir.into(),
            public_url: public_url.into(),
        }
    }

    pub fn s3(config: S3Config, local_dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::S3(config),
            local_dir: local_dir.into(),
            public_url: public_url.into(),
        }
    }

    /// Builds storage from `STORAGE_TYPE` (`local` or `s3*`). An incomplete S3
    /// configuration degrades to local storage with a warning.
    pub fn from_env(local_dir: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        let storage_type = env::var("STORAGE_TYPE").unwrap_or_else(|_| "local".to_string());

        if storage_type.starts_with("s3") {
            match S3Config::from_env() {
                Ok(config) => {
                    info!(bucket = %config.bucket, region = %config.region, "Resume storage: S3");
                    return Self::s3(config, local_dir, public_url);
                }
                Err(e) => {
                    warn!(error = %e, "S3 storage requested but not configured, using local storage");
                }
            }
        }

        let storage = Self::local(local_dir, public_url);
        info!(dir = %storage.local_dir.display(), "Resume storage: local");
        storage
    }

    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    /// URL under which a locally stored resume is served
    pub fn local_url(&self, filename: &str) -> String {
        format!(
            "{}/uploads/resumes/{}",
            self.public_url.trim_end_matches('/'),
            filename
        )
    }

    /// Stores a resume for `owner` under a fresh `R_XXXXXX.pdf` name and
    /// returns its public URL. Existing objects are never overwritten.
    pub async fn store_resume(&self, owner: &str, data: Vec<u8>) -> Result<String, StorageError> {
        match &self.backend {
            StorageBackend::Local => self.store_local(resume_filename, &data).await,
            StorageBackend::S3(config) => {
                // Keys are scoped by owner so a name collision can only hit the same user
                let key = format!("resumes/{}/{}", owner, resume_filename());
                match upload_to_s3(config, &key, data.clone(), "application/pdf").await {
                    Ok(()) => {
                        info!(s3_key = %key, "Resume uploaded to S3 successfully");
                        Ok(config.object_url(&key))
                    }
                    Err(e) => {
                        warn!(error = %e, s3_key = %key, "Failed to upload resume to S3, falling back to local storage");
                        self.store_local(resume_filename, &data).await
                    }
                }
            }
        }
    }

    /// Writes `data` to the first name from `next_name` that does not exist yet
    async fn store_local<F>(&self, mut next_name: F, data: &[u8]) -> Result<String, StorageError>
    where
        F: FnMut() -> String,
    {
        tokio::fs::create_dir_all(&self.local_dir).await?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = next_name();
            let file_path = self.local_dir.join(&filename);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&file_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    warn!(path = %file_path.display(), "Resume name already taken, picking another");
                    continue;
                }
                Err(e) => {
                    error!(error = %e, path = %file_path.display(), "Failed to save resume locally");
                    return Err(StorageError::Io(e));
                }
            };

            file.write_all(data).await?;
            file.flush().await?;
            return Ok(self.local_url(&filename));
        }

        Err(StorageError::NamesExhausted(MAX_NAME_ATTEMPTS))
    }
}

fn resume_filename() -> String {
    format!("{}.pdf", generate_resume_id())
}

async fn upload_to_s3(
    config: &S3Config,
    key: &str,
    data: Vec<u8>,
    content_type: &str,
) -> Result<(), StorageError> {
    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None,
        None,
        "environment",
    );

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    let client = S3Client::new(&aws_config);

    client
        .put_object()
        .bucket(&config.bucket)
        .key(key)
        .body(ByteStream::from(Bytes::from(data)))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| {
            error!(error = %e, key = %key, "Failed to upload file to S3");
            StorageError::S3Error(format!("Upload failed: {}", e))
        })?;

    Ok(())
}
