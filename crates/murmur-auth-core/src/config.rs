//! Configuration types for the auth core

use std::time::Duration;

use tokio::time::Instant;

/// Auth core configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of an issued session token
    pub token_ttl: Duration,
    /// Upper bound on any single store call
    pub store_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3 * 60 * 60), // 3 hours
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl AuthConfig {
    /// Create a config with default lifetimes
    pub fn new() -> Self {
        Self::default()
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set per-call store timeout
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Deadline for one store call made on behalf of a request
    ///
    /// The earlier of the request's own deadline and `now + store_timeout`.
    pub fn store_deadline(&self, request_deadline: Instant) -> Instant {
        request_deadline.min(Instant::now() + self.store_timeout)
    }
}
