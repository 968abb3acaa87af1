//! Auth service - ties together credential checks, token issuance and authorization

use std::sync::Arc;

use murmur_db::AccountRepository;
use murmur_types::AccountId;
use tokio::time::Instant;

use crate::{
    authorize::Authorizer,
    config::AuthConfig,
    credentials::CredentialVerifier,
    store::{bounded, SessionStore},
    token::{IssuedSession, TokenIssuer},
    AuthError,
};

/// Authentication service
///
/// Provides one entry point for:
/// - Login (credential verification followed by token issuance)
/// - Owner-scoped authorization of bearer tokens
///
/// Both repository types may be trait objects.
pub struct AuthService<A: ?Sized, S: ?Sized> {
    config: AuthConfig,
    verifier: CredentialVerifier<A>,
    issuer: TokenIssuer<S>,
    authorizer: Authorizer<S>,
    sessions: Arc<S>,
}

impl<A, S> AuthService<A, S>
where
    A: AccountRepository + ?Sized,
    S: SessionStore + ?Sized,
{
    /// Create a new auth service
    pub fn new(config: AuthConfig, accounts: Arc<A>, sessions: Arc<S>) -> Self {
        Self {
            verifier: CredentialVerifier::new(accounts, config.clone()),
            issuer: TokenIssuer::new(Arc::clone(&sessions), config.clone()),
            authorizer: Authorizer::new(Arc::clone(&sessions), config.clone()),
            sessions,
            config,
        }
    }

    /// Verify credentials and issue a session for the matching subject
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        deadline: Instant,
    ) -> Result<IssuedSession, AuthError> {
        let subject = self.verifier.verify(username, password, deadline).await?;
        self.issuer.issue(subject, deadline).await
    }

    /// Authorize a bearer credential for a route owned by `owner`
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        owner: &str,
        deadline: Instant,
    ) -> Result<AccountId, AuthError> {
        self.authorizer.authorize(authorization, owner, deadline).await
    }

    /// Resolve a token without any ownership check
    pub async fn resolve(&self, token: &str, deadline: Instant) -> Result<AccountId, AuthError> {
        self.authorizer.resolve(token, deadline).await
    }

    /// Session store reachability, for readiness probes
    pub async fn check_session_store(&self, deadline: Instant) -> Result<(), AuthError> {
        bounded(self.config.store_deadline(deadline), self.sessions.ping()).await?;
        Ok(())
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl<A: ?Sized, S: ?Sized> std::fmt::Debug for AuthService<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use murmur_db::MemoryStore;
    use murmur_types::NewAccount;

    use super::*;
    use crate::store::MemorySessionStore;

    #[tokio::test]
    async fn test_service_over_trait_objects() {
        let accounts = MemoryStore::new();
        let alice = accounts
            .create(NewAccount {
                username: "alice".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let accounts: Arc<dyn AccountRepository> = Arc::new(accounts);
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let service = AuthService::new(AuthConfig::new(), accounts, sessions);

        let deadline = Instant::now() + Duration::from_secs(5);
        let session = service.login("alice", "secret", deadline).await.unwrap();
        let header = format!("Bearer {}", session.token);
        let subject = service
            .authorize(Some(&header), &alice.id.to_string(), deadline)
            .await
            .unwrap();

        assert_eq!(subject, alice.id);
        assert!(service.check_session_store(deadline).await.is_ok());
    }
}
