// client/src/lib.rs
//! Client state layer for the job board API
//!
//! [`AppContext`] holds what the front end renders: jobs, the search filter,
//! and the company and user sessions. Collaborators are injected: the
//! [`ApiClient`], a [`TokenStore`] for the persisted company token, an
//! [`IdentityProvider`] for user bearer tokens and a [`Notifier`] for errors.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod models;
pub mod notify;
pub mod storage;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use context::{AppContext, SessionHandle};
pub use error::{ClientError, ClientResult};
pub use identity::{Identity, IdentityProvider, StaticIdentity};
pub use models::{Application, Company, Job, SearchFilter, User};
pub use notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore, COMPANY_TOKEN_KEY};
