//! Session store adapter
//!
//! A key-value store with per-key expiry holding `token -> subject`.
//! The core relies on the store's own single-key atomicity and never
//! takes an application-level lock around it.

mod memory;
mod redis;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

pub use self::memory::MemorySessionStore;
pub use self::redis::{RedisSessionStore, RedisSettings};

/// Session store failures
///
/// A missing key is not an error; `get` reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connectivity or protocol failure
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete before its deadline
    #[error("session store call timed out")]
    Timeout,
}

/// Result alias for session store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store with per-key expiry
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Bind `token` to `subject` for `ttl` (`SET token subject EX ttl`)
    async fn set(&self, token: &str, subject: &str, ttl: Duration) -> StoreResult<()>;

    /// Resolve a live token (`GET token`)
    async fn get(&self, token: &str) -> StoreResult<Option<String>>;

    /// Connectivity check
    async fn ping(&self) -> StoreResult<()>;
}

/// Run a store call, giving up at `deadline`
pub(crate) async fn bounded<T, F>(deadline: Instant, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout_at(deadline, call)
        .await
        .map_err(|_| StoreError::Timeout)?
}
