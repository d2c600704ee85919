//! Store trait definitions for the domain layer.
//!
//! The core only depends on the [`KvStore`] contract. Concrete adapters live in
//! `crate::infrastructure::store`; mock implementations are generated via
//! `mockall` for unit tests.

pub mod kv_store;

pub use kv_store::{KvStore, StoreError};

#[cfg(test)]
pub use kv_store::MockKvStore;
