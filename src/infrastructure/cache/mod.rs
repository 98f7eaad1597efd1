//! Key-value cache used for session tokens
//!
//! Callers only need get, set with a TTL and delete. The in-memory backend
//! serves single-instance deployments and tests; Redis is used when several
//! instances share sessions.

mod memory;
mod redis_cache;

pub use memory::InMemoryCache;
pub use redis_cache::RedisCache;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::config::{CacheBackend, CacheSettings};
use crate::shared::errors::InfraError;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, InfraError>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), InfraError>;
    async fn delete(&self, key: &str) -> Result<(), InfraError>;
}

pub type SharedCache = Arc<dyn Cache>;

/// Build the configured cache backend.
pub async fn create_cache(settings: &CacheSettings) -> Result<SharedCache, InfraError> {
    match settings.backend {
        CacheBackend::Memory => {
            info!("Using in-memory cache");
            Ok(Arc::new(InMemoryCache::new()))
        }
        CacheBackend::Redis => {
            info!("Connecting to Redis cache");
            Ok(Arc::new(RedisCache::connect(&settings.redis_url).await?))
        }
    }
}
