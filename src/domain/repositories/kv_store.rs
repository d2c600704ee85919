//! Key-value store contract consumed by the identifier generator and the
//! shortening service.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a store adapter.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store operation error: {0}")]
    Operation(String),
}

/// A flat string-to-string namespace reachable over the network.
///
/// Implementations must be safe for concurrent use by many request workers
/// and must not hold in-process locks across network calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for tests and local runs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists, even when the value is empty
    /// - `Ok(None)` if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Returns whether `key` currently holds a value.
    async fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Unconditionally writes `value` under `key`.
    ///
    /// The write succeeds or fails as a whole. The shortening path never
    /// overwrites a mapping and claims identifiers through
    /// [`KvStore::insert_if_absent`] instead; only test fixtures seed
    /// mappings through this.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Writes `value` under `key` only if the key is absent.
    ///
    /// Returns `Ok(false)` without touching the existing value when the key is
    /// already taken. The check and the write are a single atomic step.
    async fn insert_if_absent(&self, key: &str, value: &str) -> Result<bool, StoreError>;

    /// Round-trips to the backend to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
