// client/src/api.rs
//! Thin typed wrapper over the job board HTTP API
//!
//! Every endpoint answers with a JSON envelope carrying a `success` flag. The
//! envelope is decoded whatever the HTTP status, so a `success: false` body
//! surfaces as [`ClientError::Api`] with the server's message.

use reqwest::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};
use crate::models::{Application, Company, Envelope, Job, NewUser, User};

pub const COMPANY_TOKEN_HEADER: &str = "token";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn envelope(&self, request: RequestBuilder) -> ClientResult<(u16, Envelope)> {
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        debug!(status = %status, bytes = bytes.len(), "API response");

        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => Ok((status.as_u16(), envelope)),
            Err(e) if status.is_success() => Err(ClientError::Decode(e.to_string())),
            Err(_) => Err(ClientError::Api {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).trim().to_string(),
            }),
        }
    }

    /// Sends the request and returns the envelope, failing on `success: false`
    async fn call(&self, request: RequestBuilder) -> ClientResult<Envelope> {
        let (status, envelope) = self.envelope(request).await?;
        if envelope.success {
            Ok(envelope)
        } else {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            warn!(status, message = %message, "API reported failure");
            Err(ClientError::Api { status, message })
        }
    }

    fn field<T: DeserializeOwned>(mut envelope: Envelope, key: &str) -> ClientResult<T> {
        let value = envelope
            .payload
            .remove(key)
            .ok_or_else(|| ClientError::Decode(format!("missing `{}` in response", key)))?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn message(envelope: Envelope) -> String {
        envelope.message.unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Public listings
    // ------------------------------------------------------------------------

    pub async fn get_jobs(&self) -> ClientResult<Vec<Job>> {
        let envelope = self.call(self.client.get(self.url("/api/jobs"))).await?;
        Self::field(envelope, "jobs")
    }

    // ------------------------------------------------------------------------
    // Company session
    // ------------------------------------------------------------------------

    pub async fn get_company(&self, company_token: &str) -> ClientResult<Company> {
        let request = self
            .client
            .get(self.url("/api/company/company"))
            .header(COMPANY_TOKEN_HEADER, company_token);
        let envelope = self.call(request).await?;
        Self::field(envelope, "company")
    }

    // ------------------------------------------------------------------------
    // User session
    // ------------------------------------------------------------------------

    /// `Ok(None)` when the server answers `success: false`, typically because
    /// no record exists yet for the session's user.
    pub async fn get_user(&self, bearer: &str) -> ClientResult<Option<User>> {
        let request = self.client.get(self.url("/api/users/user")).bearer_auth(bearer);
        let (status, envelope) = self.envelope(request).await?;
        if !envelope.success {
            debug!(status, message = ?envelope.message, "User lookup unsuccessful");
            return Ok(None);
        }
        Self::field(envelope, "user").map(Some)
    }

    pub async fn create_or_get_user(&self, bearer: &str, user: &NewUser) -> ClientResult<User> {
        let request = self
            .client
            .post(self.url("/api/users/create-or-get"))
            .bearer_auth(bearer)
            .json(user);
        let envelope = self.call(request).await?;
        Self::field(envelope, "user")
    }

    pub async fn get_applications(&self, bearer: &str) -> ClientResult<Vec<Application>> {
        let request = self
            .client
            .get(self.url("/api/users/applications"))
            .bearer_auth(bearer);
        let envelope = self.call(request).await?;
        Self::field(envelope, "applications")
    }

    pub async fn apply(&self, bearer: &str, job_id: &str) -> ClientResult<String> {
        let request = self
            .client
            .post(self.url("/api/users/apply"))
            .bearer_auth(bearer)
            .json(&serde_json::json!({ "jobId": job_id }));
        let envelope = self.call(request).await?;
        Ok(Self::message(envelope))
    }

    pub async fn update_resume(
        &self,
        bearer: &str,
        filename: &str,
        content: Vec<u8>,
    ) -> ClientResult<String> {
        let part = multipart::Part::bytes(content)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("resume", part);

        let request = self
            .client
            .post(self.url("/api/users/update-resume"))
            .bearer_auth(bearer)
            .multipart(form);
        let envelope = self.call(request).await?;
        Ok(Self::message(envelope))
    }
}
