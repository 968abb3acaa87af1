//! Application state

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use murmur_auth_core::{AuthService, SessionStore};
use murmur_axum::RequestContext;
use murmur_db::{AccountRepository, CatalogRepository, DbError, DbResult, PostRepository};

use crate::config::Config;
use crate::error::ApiResult;

/// Auth service over trait-object stores, so Postgres/Redis and in-memory
/// backends share one router type
pub type AuthServiceImpl = AuthService<dyn AccountRepository, dyn SessionStore>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Login and owner authorization
    pub auth: Arc<AuthServiceImpl>,
    pub accounts: Arc<dyn AccountRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: Config,
        accounts: Arc<dyn AccountRepository>,
        posts: Arc<dyn PostRepository>,
        catalog: Arc<dyn CatalogRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let auth = AuthService::new(config.auth.clone(), Arc::clone(&accounts), sessions);

        Self {
            auth: Arc::new(auth),
            accounts,
            posts,
            catalog,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout
    }

    /// Run a resource-store call under this request's store deadline.
    pub async fn query<T, F>(&self, ctx: &RequestContext, call: F) -> ApiResult<T>
    where
        F: Future<Output = DbResult<T>>,
    {
        let deadline = self.config.auth.store_deadline(ctx.deadline());
        match tokio::time::timeout_at(deadline, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(DbError::Unavailable("deadline exceeded".to_string()).into()),
        }
    }
}
