//! Bearer-token authorization with the owner-match check
//!
//! Outcome of one authorization attempt:
//!
//! | Step | Failure | Result |
//! |------|---------|--------|
//! | header present, `Bearer ` scheme | absent / other scheme | `MissingOrMalformedToken` |
//! | token lookup | key absent or expired (an empty token is never present) | `InvalidOrExpiredToken` |
//! | token lookup | store unreachable or timed out | `SessionStoreUnavailable` |
//! | owner match | subject differs from route owner | `IdentityMismatch` |
//!
//! Only a matching owner authorizes. No step is retried.

use std::sync::Arc;

use murmur_types::AccountId;
use tokio::time::Instant;

use crate::config::AuthConfig;
use crate::crypto::token_fingerprint;
use crate::store::{bounded, SessionStore};
use crate::AuthError;

/// Literal scheme prefix of an `Authorization` header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value
///
/// Never touches the session store. Whatever follows the prefix is the
/// token, including nothing at all.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingOrMalformedToken)
}

/// Validates bearer tokens against the session store
pub struct Authorizer<S: ?Sized> {
    store: Arc<S>,
    config: AuthConfig,
}

impl<S: SessionStore + ?Sized> Authorizer<S> {
    pub fn new(store: Arc<S>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Resolve a token to the subject it is bound to
    pub async fn resolve(&self, token: &str, deadline: Instant) -> Result<AccountId, AuthError> {
        let stored = bounded(self.config.store_deadline(deadline), self.store.get(token)).await?;

        let Some(value) = stored else {
            tracing::debug!(token = %token_fingerprint(token), "Token not found in session store");
            return Err(AuthError::InvalidOrExpiredToken);
        };

        AccountId::parse(&value).map_err(|e| {
            tracing::warn!(token = %token_fingerprint(token), error = %e, "Session bound to unparseable subject");
            AuthError::InvalidOrExpiredToken
        })
    }

    /// Authorize a request scoped to `owner`
    ///
    /// `owner` is the raw path segment naming the resource owner; it must
    /// equal the decimal form of the session's subject.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        owner: &str,
        deadline: Instant,
    ) -> Result<AccountId, AuthError> {
        let token = bearer_token(authorization)?;
        let subject = self.resolve(token, deadline).await?;

        if subject.to_string() != owner {
            tracing::debug!(subject = %subject, owner, "Token subject does not own resource");
            return Err(AuthError::IdentityMismatch);
        }

        Ok(subject)
    }
}
