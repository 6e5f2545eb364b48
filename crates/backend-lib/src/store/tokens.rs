// ============================
// crates/backend-lib/src/store/tokens.rs
// ============================
//! Ephemeral key-value storage with expiry, used for session tokens.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;

use crate::error::AppError;

/// Trait for key-value backends with native expiry
#[async_trait]
pub trait TokenBackend: Send + Sync {
    /// Connection liveness probe
    async fn ping(&self) -> Result<(), AppError>;

    /// Fetch the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Store `value` under `key`, expiring after `ttl_secs`
    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AppError>;

    /// Remove `key`, returning how many entries were removed (0 or 1)
    async fn del(&self, key: &str) -> Result<u32, AppError>;
}

/// Redis implementation of the token backend.
///
/// The connection manager is a single process-wide handle, established at
/// startup and cloned per call. Expiry is delegated to Redis; no sweeping
/// happens on our side.
#[derive(Clone)]
pub struct RedisTokenBackend {
    manager: redis::aio::ConnectionManager,
}

impl RedisTokenBackend {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        let manager = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl TokenBackend for RedisTokenBackend {
    async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(value)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AppError> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(key, value, ttl_secs)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u32, AppError> {
        let mut conn = self.manager.clone();
        let removed: u32 = conn
            .del(key)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(removed)
    }
}

/// In-memory implementation of the token backend.
///
/// Entries carry their own deadline and are dropped lazily on access, so
/// expiry behaves like the store-managed TTL without a cleanup task.
#[derive(Clone, Default)]
pub struct MemoryTokenBackend {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
}

impl MemoryTokenBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenBackend for MemoryTokenBackend {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some((_, deadline)) if Instant::now() >= *deadline => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), AppError> {
        let deadline = Instant::now() + Duration::from_secs(ttl_secs);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), deadline));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<u32, AppError> {
        Ok(u32::from(self.entries.write().await.remove(key).is_some()))
    }
}

/// Policy adapter around a token backend.
///
/// All operations are best-effort: on any backend error or timeout, `get`
/// returns `None` and `delete` returns 0, so a store outage degrades to
/// "looks like nobody is logged in" rather than crashing the caller. The
/// one exception is `set_with_expiry`, whose failure must surface so a
/// login does not report success without a stored session.
#[derive(Clone)]
pub struct TokenStore {
    backend: Arc<dyn TokenBackend>,
    timeout: Duration,
}

impl TokenStore {
    pub fn new(backend: Arc<dyn TokenBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub async fn is_alive(&self) -> bool {
        matches!(
            tokio::time::timeout(self.timeout, self.backend.ping()).await,
            Ok(Ok(()))
        )
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.backend.get(key)).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, key, "token store get failed");
                None
            }
            Err(_) => {
                tracing::warn!(key, "token store get timed out");
                None
            }
        }
    }

    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), AppError> {
        match tokio::time::timeout(self.timeout, self.backend.set_ex(key, value, ttl.as_secs()))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(AppError::StoreUnavailable(
                "token store set timed out".to_string(),
            )),
        }
    }

    pub async fn delete(&self, key: &str) -> u32 {
        match tokio::time::timeout(self.timeout, self.backend.del(key)).await {
            Ok(Ok(removed)) => removed,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, key, "token store delete failed");
                0
            }
            Err(_) => {
                tracing::warn!(key, "token store delete timed out");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(backend: MemoryTokenBackend) -> TokenStore {
        TokenStore::new(Arc::new(backend), Duration::from_secs(1))
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = store(MemoryTokenBackend::new());
        store
            .set_with_expiry("auth_t1", "user-1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get("auth_t1").await.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let store = store(MemoryTokenBackend::new());
        store
            .set_with_expiry("auth_t1", "user-1", Duration::from_secs(0))
            .await
            .unwrap();
        assert_eq!(store.get("auth_t1").await, None);
    }

    #[tokio::test]
    async fn delete_reports_how_many_entries_went_away() {
        let store = store(MemoryTokenBackend::new());
        store
            .set_with_expiry("auth_t1", "user-1", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.delete("auth_t1").await, 1);
        assert_eq!(store.delete("auth_t1").await, 0);
        assert_eq!(store.delete("never-stored").await, 0);
    }

    #[tokio::test]
    async fn memory_backend_is_alive() {
        assert!(store(MemoryTokenBackend::new()).is_alive().await);
    }
}
