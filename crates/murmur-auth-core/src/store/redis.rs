//! Redis-backed session store

use std::time::Duration;

use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisError};
use async_trait::async_trait;

use super::{SessionStore, StoreError, StoreResult};

/// Connection settings for the Redis session store
#[derive(Debug, Clone)]
pub struct RedisSettings {
    /// `host:port`
    pub addr: String,
    /// Optional `AUTH` password
    pub password: Option<String>,
    /// Logical database index
    pub db: i64,
}

impl RedisSettings {
    fn connection_info(&self) -> StoreResult<ConnectionInfo> {
        let (host, port) = self
            .addr
            .rsplit_once(':')
            .ok_or_else(|| StoreError::Unavailable(format!("invalid redis address: {}", self.addr)))?;
        let port: u16 = port
            .parse()
            .map_err(|_| StoreError::Unavailable(format!("invalid redis port: {port}")))?;

        Ok(ConnectionInfo {
            addr: ConnectionAddr::Tcp(host.to_string(), port),
            redis: RedisConnectionInfo {
                db: self.db,
                password: self.password.clone(),
                ..Default::default()
            },
        })
    }
}

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Session store over a multiplexed, auto-reconnecting Redis connection
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect and verify the server answers `PING`
    pub async fn connect(settings: &RedisSettings) -> StoreResult<Self> {
        let client = ::redis::Client::open(settings.connection_info()?)?;
        let conn = ConnectionManager::new(client).await?;
        let store = Self { conn };
        store.ping().await?;
        tracing::info!(addr = %settings.addr, db = settings.db, "Connected to session store");
        Ok(store)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, token: &str, subject: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(token, subject, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        let subject: Option<String> = conn.get(token).await?;
        Ok(subject)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: String = ::redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_info_from_settings() {
        let settings = RedisSettings {
            addr: "cache.internal:6380".to_string(),
            password: Some("hunter2".to_string()),
            db: 3,
        };
        let info = settings.connection_info().unwrap();
        assert!(matches!(info.addr, ConnectionAddr::Tcp(ref host, 6380) if host == "cache.internal"));
        assert_eq!(info.redis.db, 3);
        assert_eq!(info.redis.password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn test_connection_info_rejects_bad_addr() {
        let settings = RedisSettings {
            addr: "no-port".to_string(),
            password: None,
            db: 0,
        };
        assert!(settings.connection_info().is_err());
    }
}
