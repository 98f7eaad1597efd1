use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;

use super::Cache;
use crate::shared::errors::InfraError;

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache. Expired entries are dropped on read, and every write
/// sweeps the rest so keys that are never read again do not linger.
#[derive(Default)]
pub struct InMemoryCache {
    entries: DashMap<String, Entry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, InfraError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Ok(Some(entry.value.clone()));
            }
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), InfraError> {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), InfraError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let cache = InMemoryCache::new();
        cache.set("user:1", "token", Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get("user:1").await.unwrap().as_deref(), Some("token"));

        cache.delete("user:1").await.unwrap();
        assert_eq!(cache.get("user:1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn expired_entries_are_evicted() {
        let cache = InMemoryCache::new();
        cache.set("user:2", "token", Duration::ZERO).await.unwrap();
        assert_eq!(cache.get("user:2").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn writes_sweep_unread_expired_entries() {
        let cache = InMemoryCache::new();
        cache.set("user:3", "stale", Duration::ZERO).await.unwrap();
        cache.set("user:4", "stale", Duration::ZERO).await.unwrap();
        cache.set("user:5", "fresh", Duration::from_secs(60)).await.unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("user:5").await.unwrap().as_deref(), Some("fresh"));
    }
}
