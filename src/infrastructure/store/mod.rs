//! Key-value store adapters.
//!
//! Both implement [`crate::domain::repositories::KvStore`]:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for tests and local runs

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
