//! In-process session store

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use super::{SessionStore, StoreResult};

/// Session store kept in process memory
///
/// Expiry is measured on the tokio clock, so a paused runtime can step
/// past a token's lifetime. Expired entries read as absent and are
/// dropped on read.
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    entries: Arc<DashMap<String, (String, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including expired ones not yet read
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, token: &str, subject: &str, ttl: Duration) -> StoreResult<()> {
        self.entries
            .insert(token.to_string(), (subject.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();
        let live = self
            .entries
            .get(token)
            .map(|entry| (entry.0.clone(), entry.1 > now));

        match live {
            Some((subject, true)) => Ok(Some(subject)),
            Some((_, false)) => {
                self.entries.remove_if(token, |_, (_, expires)| *expires <= now);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
