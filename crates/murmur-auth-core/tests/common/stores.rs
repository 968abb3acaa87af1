//! Instrumented session stores and a pre-seeded service

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use murmur_auth_core::{
    AuthConfig, AuthService, MemorySessionStore, SessionStore, StoreError, StoreResult,
};
use murmur_db::{AccountRepository, MemoryStore};
use murmur_types::{AccountId, NewAccount};

/// Memory store that counts lookups
#[derive(Default, Clone)]
pub struct CountingStore {
    inner: MemorySessionStore,
    gets: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn lookups(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for CountingStore {
    async fn set(&self, token: &str, subject: &str, ttl: Duration) -> StoreResult<()> {
        self.inner.set(token, subject, ttl).await
    }

    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(token).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.inner.ping().await
    }
}

/// Memory store that can be taken offline or made to hang
#[derive(Default, Clone)]
pub struct FlakyStore {
    inner: MemorySessionStore,
    down: Arc<AtomicBool>,
    hang: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FlakyStore {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn set_hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    async fn gate(&self) -> StoreResult<()> {
        if self.hang.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FlakyStore {
    async fn set(&self, token: &str, subject: &str, ttl: Duration) -> StoreResult<()> {
        self.gate().await?;
        self.inner.set(token, subject, ttl).await
    }

    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        self.gate().await?;
        self.inner.get(token).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.gate().await
    }
}

pub type TestService<S> = AuthService<MemoryStore, S>;

/// Service with accounts `alice/secret` and `bob/hunter2`
pub async fn seeded_service<S: SessionStore>(
    sessions: Arc<S>,
    config: AuthConfig,
) -> (TestService<S>, AccountId, AccountId) {
    let accounts = MemoryStore::new();
    let alice = accounts
        .create(NewAccount {
            username: "alice".into(),
            password: "secret".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    let bob = accounts
        .create(NewAccount {
            username: "bob".into(),
            password: "hunter2".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let service = AuthService::new(config, Arc::new(accounts), sessions);
    (service, alice.id, bob.id)
}
