// client/src/context.rs
//! Application state shared by the job board front end
//!
//! `AppContext` owns the UI state (search filter, job list, company and user
//! sessions) and refreshes it from the API when the session changes:
//!
//! - `mount` loads jobs and restores a stored company token
//! - a new company token loads the company profile
//! - a new signed-in identity loads (or creates) the user record, then the
//!   user's applications
//!
//! Failures are reported through the [`Notifier`] and leave state untouched.
//! Closing the [`SessionHandle`] abandons in-flight requests silently.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::identity::{Identity, IdentityProvider};
use crate::models::{Application, Company, Job, SearchFilter, User};
use crate::notify::{Notifier, TracingNotifier};
use crate::storage::{FileTokenStore, TokenStore, COMPANY_TOKEN_KEY};

pub const CREATE_USER_FAILED: &str = "Failed to create user account. Please try again.";
pub const FETCH_USER_FAILED: &str = "Failed to fetch user data. Please try again.";

/// Cloneable handle ending the context's session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    closed: Arc<watch::Sender<bool>>,
}

impl SessionHandle {
    fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            closed: Arc::new(closed),
        }
    }

    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    async fn wait_closed(&self) {
        let mut rx = self.closed.subscribe();
        // The sender lives as long as this handle, so this only ends on close
        let _ = rx.wait_for(|closed| *closed).await;
    }
}

pub struct AppContext {
    api: ApiClient,
    store: Arc<dyn TokenStore>,
    identity_provider: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    session: SessionHandle,

    search_filter: SearchFilter,
    is_searched: bool,
    jobs: Vec<Job>,
    show_recruiter_login: bool,
    company_token: Option<String>,
    company_data: Option<Company>,
    identity: Option<Identity>,
    user_data: Option<User>,
    user_applications: Vec<Application>,
}

impl AppContext {
    pub fn new(
        api: ApiClient,
        store: Arc<dyn TokenStore>,
        identity_provider: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            store,
            identity_provider,
            notifier,
            session: SessionHandle::new(),
            search_filter: SearchFilter::default(),
            is_searched: false,
            jobs: Vec::new(),
            show_recruiter_login: false,
            company_token: None,
            company_data: None,
            identity: None,
            user_data: None,
            user_applications: Vec::new(),
        }
    }

    /// File-backed token store and tracing notifications
    pub fn from_config(config: &ClientConfig, identity_provider: Arc<dyn IdentityProvider>) -> Self {
        Self::new(
            ApiClient::new(config.backend_url.clone()),
            Arc::new(FileTokenStore::new(config.storage_path.clone())),
            identity_provider,
            Arc::new(TracingNotifier),
        )
    }

    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    // ========================================================================
    // STATE ACCESSORS
    // ========================================================================

    pub fn backend_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn search_filter(&self) -> &SearchFilter {
        &self.search_filter
    }

    pub fn set_search_filter(&mut self, filter: SearchFilter) {
        self.search_filter = filter;
    }

    pub fn is_searched(&self) -> bool {
        self.is_searched
    }

    pub fn set_is_searched(&mut self, searched: bool) {
        self.is_searched = searched;
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    pub fn show_recruiter_login(&self) -> bool {
        self.show_recruiter_login
    }

    pub fn set_show_recruiter_login(&mut self, show: bool) {
        self.show_recruiter_login = show;
    }

    pub fn company_token(&self) -> Option<&str> {
        self.company_token.as_deref()
    }

    pub fn company_data(&self) -> Option<&Company> {
        self.company_data.as_ref()
    }

    pub fn set_company_data(&mut self, company: Option<Company>) {
        self.company_data = company;
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn user_data(&self) -> Option<&User> {
        self.user_data.as_ref()
    }

    pub fn set_user_data(&mut self, user: Option<User>) {
        self.user_data = user;
    }

    pub fn user_applications(&self) -> &[Application] {
        &self.user_applications
    }

    pub fn set_user_applications(&mut self, applications: Vec<Application>) {
        self.user_applications = applications;
    }

    /// Jobs matching the current search filter
    pub fn filtered_jobs(&self) -> Vec<&Job> {
        self.jobs
            .iter()
            .filter(|job| self.search_filter.matches(job))
            .collect()
    }

    pub fn search(&mut self, filter: SearchFilter) {
        self.search_filter = filter;
        self.is_searched = true;
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    pub async fn mount(&mut self) {
        let _ = self.fetch_jobs().await;

        let stored = match self.guard(self.store.get(COMPANY_TOKEN_KEY)).await {
            Ok(stored) => stored,
            Err(e) => {
                self.report(e);
                return;
            }
        };

        if let Some(token) = stored.filter(|t| !t.is_empty()) {
            debug!("Restored company token from storage");
            let _ = self.set_company_token(Some(token)).await;
        }
    }

    /// Setting a new token loads the company; `None` never fetches
    pub async fn set_company_token(&mut self, token: Option<String>) -> ClientResult<()> {
        if token == self.company_token {
            return Ok(());
        }
        self.company_token = token;

        if self.company_token.is_some() {
            self.fetch_company_data().await
        } else {
            Ok(())
        }
    }

    /// A newly signed-in identity loads the user record and applications
    pub async fn set_identity(&mut self, identity: Option<Identity>) -> ClientResult<()> {
        let changed = identity.as_ref().map(|i| &i.id) != self.identity.as_ref().map(|i| &i.id);
        self.identity = identity;

        if !changed {
            return Ok(());
        }

        // Nothing from the previous identity survives a switch
        self.user_data = None;
        self.user_applications.clear();
        if self.identity.is_none() {
            return Ok(());
        }

        let user = self.fetch_user_data().await;
        let applications = self.fetch_user_applications().await;
        user.and(applications)
    }

    // ========================================================================
    // FETCHES
    // ========================================================================

    pub async fn fetch_jobs(&mut self) -> ClientResult<()> {
        match self.guard(self.api.get_jobs()).await {
            Ok(jobs) => {
                debug!(count = jobs.len(), "Jobs loaded");
                self.jobs = jobs;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    pub async fn fetch_company_data(&mut self) -> ClientResult<()> {
        let Some(token) = self.company_token.clone() else {
            return Ok(());
        };

        match self.guard(self.api.get_company(&token)).await {
            Ok(company) => {
                info!(company_id = %company.id, "Company session loaded");
                self.company_data = Some(company);
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Loads the signed-in user's record, creating it on first sign-in
    pub async fn fetch_user_data(&mut self) -> ClientResult<()> {
        let Some(identity) = self.identity.clone() else {
            return Ok(());
        };

        let result = self.load_or_create_user(&identity).await;
        match result {
            Ok(user) => {
                debug!(user_id = %user.id, "User loaded");
                self.user_data = Some(user);
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e @ ClientError::Api { .. }) => {
                self.notifier.error(CREATE_USER_FAILED);
                Err(e)
            }
            Err(e) => {
                self.notifier.error(FETCH_USER_FAILED);
                Err(e)
            }
        }
    }

    /// Only a rejected creation request yields [`ClientError::Api`]
    async fn load_or_create_user(&self, identity: &Identity) -> ClientResult<User> {
        let bearer = self.bearer().await?;

        let existing = self
            .guard(self.api.get_user(&bearer))
            .await
            .map_err(|e| match e {
                ClientError::Api { message, .. } => ClientError::Decode(message),
                other => other,
            })?;
        if let Some(user) = existing {
            return Ok(user);
        }

        let new_user = identity.new_user()?;
        info!(user_id = %new_user.user_id, "Creating user record");
        self.guard(self.api.create_or_get_user(&bearer, &new_user)).await
    }

    pub async fn fetch_user_applications(&mut self) -> ClientResult<()> {
        if self.identity.is_none() {
            return Ok(());
        }

        let result = match self.bearer().await {
            Ok(bearer) => self.guard(self.api.get_applications(&bearer)).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(applications) => {
                self.user_applications = applications;
                Ok(())
            }
            Err(e) => Err(self.report(e)),
        }
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// Applies the signed-in user to a job and refreshes their applications
    pub async fn apply_for_job(&mut self, job_id: &str) -> ClientResult<String> {
        let result = match self.bearer().await {
            Ok(bearer) => self.guard(self.api.apply(&bearer, job_id)).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(message) => {
                let _ = self.fetch_user_applications().await;
                Ok(message)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Uploads a PDF resume and refreshes the user record
    pub async fn update_resume(&mut self, filename: &str, content: Vec<u8>) -> ClientResult<String> {
        let result = match self.bearer().await {
            Ok(bearer) => {
                self.guard(self.api.update_resume(&bearer, filename, content))
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(message) => {
                let _ = self.fetch_user_data().await;
                Ok(message)
            }
            Err(e) => Err(self.report(e)),
        }
    }

    /// Persists the company token, then loads the company
    pub async fn login_company(&mut self, token: impl Into<String>) -> ClientResult<()> {
        let token = token.into();
        if let Err(e) = self.store.set(COMPANY_TOKEN_KEY, &token).await {
            return Err(self.report(e));
        }
        self.show_recruiter_login = false;
        self.set_company_token(Some(token)).await
    }

    pub async fn logout_company(&mut self) -> ClientResult<()> {
        if let Err(e) = self.store.remove(COMPANY_TOKEN_KEY).await {
            return Err(self.report(e));
        }
        self.company_token = None;
        self.company_data = None;
        Ok(())
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    async fn bearer(&self) -> ClientResult<String> {
        self.guard(self.identity_provider.token()).await
    }

    /// Runs `fut` unless the session closes first
    async fn guard<T, F>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.session.is_closed() {
            return Err(ClientError::Cancelled);
        }
        tokio::select! {
            _ = self.session.wait_closed() => Err(ClientError::Cancelled),
            result = fut => result,
        }
    }

    /// Notifies about `error` and hands it back; cancellations stay silent
    fn report(&self, error: ClientError) -> ClientError {
        if !matches!(error, ClientError::Cancelled) {
            self.notifier.error(&error.to_string());
        }
        error
    }
}
