// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Session-token authentication backend for the `filedock` file-manager
//! HTTP API.

pub mod auth;
pub mod config;
pub mod digest;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthService, DefaultAuth};
use crate::config::Settings;
use crate::store::{CredentialStore, TokenStore};

/// Application state shared across all handlers.
///
/// The two store facades wrap the process-wide driver handles; nothing
/// here caches tokens or users between requests.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// User-record store facade
    pub credentials: CredentialStore,
    /// Session-token store facade
    pub tokens: TokenStore,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state
    pub fn new(credentials: CredentialStore, tokens: TokenStore, settings: Settings) -> Self {
        let auth = Arc::new(DefaultAuth::new(
            credentials.clone(),
            tokens.clone(),
            settings.digest,
            Duration::from_secs(settings.session_ttl_secs),
        ));

        Self {
            auth,
            credentials,
            tokens,
            settings: Arc::new(settings),
        }
    }
}
