//! Credential verification against stored accounts

use std::sync::Arc;

use murmur_db::AccountRepository;
use murmur_types::AccountId;
use tokio::time::Instant;

use crate::config::AuthConfig;
use crate::crypto::constant_time_str_eq;
use crate::AuthError;

/// Checks a username/password pair against the resource store
///
/// Passwords are stored and compared in clear text. Unknown usernames and
/// wrong passwords produce the same `InvalidCredentials` error.
pub struct CredentialVerifier<A: ?Sized> {
    accounts: Arc<A>,
    config: AuthConfig,
}

impl<A: AccountRepository + ?Sized> CredentialVerifier<A> {
    pub fn new(accounts: Arc<A>, config: AuthConfig) -> Self {
        Self { accounts, config }
    }

    /// Resolve the subject owning these credentials
    pub async fn verify(
        &self,
        username: &str,
        password: &str,
        deadline: Instant,
    ) -> Result<AccountId, AuthError> {
        let lookup = self.accounts.find_by_username(username);
        let account = tokio::time::timeout_at(self.config.store_deadline(deadline), lookup)
            .await
            .map_err(|_| {
                tracing::error!("Account lookup timed out");
                AuthError::ResourceStoreUnavailable("account lookup timed out".to_string())
            })??;

        match account {
            Some(account) if constant_time_str_eq(&account.password, password) => {
                tracing::debug!(subject = %account.id, "Credentials verified");
                Ok(account.id)
            }
            Some(_) => {
                tracing::debug!(username, "Password mismatch");
                Err(AuthError::InvalidCredentials)
            }
            None => {
                tracing::debug!(username, "No such account");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use murmur_db::MemoryStore;
    use murmur_types::NewAccount;

    use super::*;

    async fn verifier_with_alice() -> (CredentialVerifier<MemoryStore>, AccountId, MemoryStore) {
        let store = MemoryStore::new();
        let alice = store
            .create(NewAccount {
                username: "alice".into(),
                password: "secret".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let verifier = CredentialVerifier::new(Arc::new(store.clone()), AuthConfig::new());
        (verifier, alice.id, store)
    }

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[tokio::test]
    async fn test_valid_credentials_return_subject() {
        let (verifier, alice, _) = verifier_with_alice().await;
        assert_eq!(verifier.verify("alice", "secret", deadline()).await.unwrap(), alice);
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_the_same() {
        let (verifier, _, _) = verifier_with_alice().await;

        let wrong_password = verifier.verify("alice", "nope", deadline()).await.unwrap_err();
        let unknown_user = verifier.verify("mallory", "secret", deadline()).await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let (verifier, _, _) = verifier_with_alice().await;
        assert!(matches!(
            verifier.verify("ALICE", "secret", deadline()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_infrastructure_error() {
        let (verifier, _, store) = verifier_with_alice().await;
        store.set_unavailable(true);
        assert!(matches!(
            verifier.verify("alice", "secret", deadline()).await,
            Err(AuthError::ResourceStoreUnavailable(_))
        ));
    }
}
