use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::Client;

use super::Cache;
use crate::shared::errors::InfraError;

/// Redis-backed cache. The connection manager reconnects on its own and is
/// cheap to clone per call.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, InfraError> {
        let client = Client::open(url).map_err(cache_error)?;
        let connection = client
            .get_connection_manager()
            .await
            .map_err(cache_error)?;
        Ok(Self { connection })
    }
}

fn cache_error(err: redis::RedisError) -> InfraError {
    InfraError::Cache(err.to_string())
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, InfraError> {
        let mut connection = self.connection.clone();
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut connection)
            .await
            .map_err(cache_error)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), InfraError> {
        let mut connection = self.connection.clone();
        // SET EX rejects 0, so round sub-second lifetimes up.
        let seconds = ttl.as_secs().max(1);
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async::<()>(&mut connection)
            .await
            .map_err(cache_error)
    }

    async fn delete(&self, key: &str) -> Result<(), InfraError> {
        let mut connection = self.connection.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<()>(&mut connection)
            .await
            .map_err(cache_error)
    }
}
