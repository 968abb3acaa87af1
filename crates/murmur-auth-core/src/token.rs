//! Session token issuance

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use murmur_types::AccountId;
use rand::rngs::OsRng;
use rand::RngCore;
use tokio::time::Instant;

use crate::config::AuthConfig;
use crate::crypto::token_fingerprint;
use crate::store::{bounded, SessionStore};
use crate::AuthError;

/// Random bytes per token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// A freshly minted session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Opaque bearer token
    pub token: String,
    /// Subject the token is bound to
    pub subject: AccountId,
    /// When the session store will forget the token
    pub expires_at: DateTime<Utc>,
}

/// Mints tokens and binds them to subjects in the session store
///
/// Uniqueness is probabilistic; the store is never checked for an
/// existing key. Concurrent logins for one subject yield independent
/// sessions.
pub struct TokenIssuer<S: ?Sized> {
    store: Arc<S>,
    config: AuthConfig,
}

impl<S: SessionStore + ?Sized> TokenIssuer<S> {
    pub fn new(store: Arc<S>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Issue a token for `subject`
    ///
    /// Nothing is returned unless the store write succeeded.
    pub async fn issue(
        &self,
        subject: AccountId,
        deadline: Instant,
    ) -> Result<IssuedSession, AuthError> {
        let token = generate_token();
        let ttl = self.config.token_ttl;

        bounded(
            self.config.store_deadline(deadline),
            self.store.set(&token, &subject.to_string(), ttl),
        )
        .await?;

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        tracing::info!(
            subject = %subject,
            token = %token_fingerprint(&token),
            ttl_secs = ttl.as_secs(),
            "Issued session token"
        );

        Ok(IssuedSession {
            token,
            subject,
            expires_at,
        })
    }
}

/// Fresh token from the OS CSPRNG, URL-safe base64 without padding
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::store::{MemorySessionStore, StoreError, StoreResult};

    struct DownStore;

    #[async_trait]
    impl SessionStore for DownStore {
        async fn set(&self, _: &str, _: &str, _: Duration) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn get(&self, _: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        async fn ping(&self) -> StoreResult<()> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[test]
    fn test_generated_tokens_are_distinct_and_url_safe() {
        let tokens: HashSet<String> = (0..256).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 256);
        for token in &tokens {
            assert_eq!(URL_SAFE_NO_PAD.decode(token).unwrap().len(), TOKEN_BYTES);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    #[tokio::test]
    async fn test_issue_binds_token_to_subject() {
        let store = Arc::new(MemorySessionStore::new());
        let issuer = TokenIssuer::new(Arc::clone(&store), AuthConfig::new());

        let session = issuer.issue(AccountId(5), deadline()).await.unwrap();
        assert_eq!(store.get(&session.token).await.unwrap().as_deref(), Some("5"));
        assert!(session.expires_at > Utc::now());
    }

    #[tokio::test]
    async fn test_store_failure_returns_no_token() {
        let issuer = TokenIssuer::new(Arc::new(DownStore), AuthConfig::new());
        let result = issuer.issue(AccountId(5), deadline()).await;
        assert!(matches!(result, Err(AuthError::SessionStoreUnavailable(_))));
    }
}
