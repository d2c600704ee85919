//! Redis-backed store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

use crate::domain::repositories::{KvStore, StoreError};

/// Redis store holding identifier → original URL mappings.
///
/// Keys live in a flat namespace with no prefix. The `ConnectionManager`
/// multiplexes one connection and reconnects on failure; cloning it per call
/// is cheap and safe across request workers.
#[derive(Clone)]
pub struct RedisStore {
    client: ConnectionManager,
}

fn operation_error(operation: &str, err: redis::RedisError) -> StoreError {
    if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
        StoreError::Connection(format!("{operation}: {err}"))
    } else {
        StoreError::Operation(format!("{operation}: {err}"))
    }
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let store = Self { client: manager };
        store.ping().await?;

        info!("Connected to Redis");

        Ok(store)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(key).await.map_err(|e| {
            warn!(key, error = %e, "Redis GET failed");
            operation_error("GET", e)
        })
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();

        conn.exists::<_, bool>(key).await.map_err(|e| {
            warn!(key, error = %e, "Redis EXISTS failed");
            operation_error("EXISTS", e)
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(key, value).await.map_err(|e| {
            warn!(key, error = %e, "Redis SET failed");
            operation_error("SET", e)
        })?;

        debug!(key, "Redis SET");
        Ok(())
    }

    async fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();

        let inserted = conn.set_nx::<_, _, bool>(key, value).await.map_err(|e| {
            warn!(key, error = %e, "Redis SET NX failed");
            operation_error("SET NX", e)
        })?;

        debug!(key, inserted, "Redis SET NX");
        Ok(inserted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.client.clone();

        conn.ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))
    }
}
